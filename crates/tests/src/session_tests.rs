use bson::{Document, doc};
use futures::TryStreamExt;
use mgosrv_services::MongoSession;

use crate::fixtures::test_service::TestService;

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn session_reads_its_own_writes() {
    let test = TestService::spawn().await;

    test.service
        .run_with_session(async |session: &mut MongoSession| {
            let collection = session.collection::<Document>("widgets");
            collection
                .insert_one(doc! { "name": "sprocket", "count": 3 })
                .session(&mut *session.client_session())
                .await?;

            let found = collection
                .find_one(doc! { "name": "sprocket" })
                .session(&mut *session.client_session())
                .await?
                .expect("inserted document");
            assert_eq!(found.get_i32("count")?, 3);
            Ok::<_, anyhow::Error>(())
        })
        .await
        .unwrap();

    test.teardown().await;
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn concurrent_sessions_share_the_pool() {
    let test = TestService::spawn().await;

    let results = futures::future::join_all((0..8).map(|i| {
        test.service
            .run_with_session(async move |session: &mut MongoSession| {
                session
                    .collection::<Document>("counters")
                    .insert_one(doc! { "worker": i })
                    .await?;
                Ok::<_, anyhow::Error>(())
            })
    }))
    .await;
    for result in results {
        result.unwrap();
    }

    let count = test
        .service
        .run_with_session(async |session: &mut MongoSession| {
            let cursor = session
                .collection::<Document>("counters")
                .find(doc! {})
                .await?;
            let documents: Vec<Document> = cursor.try_collect().await?;
            Ok::<_, anyhow::Error>(documents.len())
        })
        .await
        .unwrap();
    assert_eq!(count, 8);

    test.teardown().await;
}
