//! Integration Tests: Actions Feed

mod common;

use common::{backdate, pdf, png, test_db, FakeMediaStore};
use tamsa_cms::models::{
    Author, Category, FeedEntry, NewActivity, NewDocument, NewLeader, NewOpportunity, OpportunityKind,
};
use tamsa_cms::services::{
    ActivityStore, DocumentStore, FeedService, LeaderStore, OpportunityStore, RecordStore,
};

#[tokio::test]
async fn empty_database_yields_empty_feed() {
    let db = test_db().await;
    let feed = FeedService::new(db, FakeMediaStore::new()).combined().await.unwrap();
    assert!(feed.is_empty());
}

#[tokio::test]
async fn feed_merges_all_stores_newest_first() {
    let db = test_db().await;
    let media = FakeMediaStore::new();

    let leaders = LeaderStore::new(db.clone(), media.clone());
    let opportunities = OpportunityStore::new(db.clone(), media.clone());
    let activities = ActivityStore::new(db.clone(), media.clone());
    let documents = DocumentStore::new(db.clone(), media.clone());

    let leader = leaders
        .create(
            NewLeader {
                name: "Neema".to_string(),
                position: "President".to_string(),
                bio: Some("Fifth-year medical student".to_string()),
                order_index: 0,
            },
            Some(png("neema.png")),
        )
        .await
        .unwrap();

    let internship = opportunities
        .create(
            NewOpportunity {
                title: "Research internship".to_string(),
                description: "Summer placement".to_string(),
                kind: OpportunityKind::Opportunity,
                deadline: Some("2024-09-01".to_string()),
                event_date: None,
                location: None,
                author: Author::Admin,
            },
            None,
        )
        .await
        .unwrap();

    let assembly = opportunities
        .create(
            NewOpportunity {
                title: "General assembly".to_string(),
                description: "All members".to_string(),
                kind: OpportunityKind::Announcement,
                deadline: None,
                event_date: Some("2024-10-05".to_string()),
                location: Some("Main hall".to_string()),
                author: Author::Admin,
            },
            None,
        )
        .await
        .unwrap();

    let outreach = activities
        .create(
            NewActivity {
                title: "Village outreach".to_string(),
                description: "Malaria screening".to_string(),
                date: "2024-06-12".to_string(),
                location: "Bagamoyo".to_string(),
                author: Author::User,
            },
            None,
        )
        .await
        .unwrap();

    let minutes = documents
        .create(
            NewDocument {
                title: "AGM minutes".to_string(),
                category: "Minutes".to_string(),
                uploader: Author::Admin,
            },
            Some(pdf("minutes.pdf")),
        )
        .await
        .unwrap();

    backdate(&db, "leaders", "created_date", leader.id, "2024-03-01 10:00:00").await;
    backdate(&db, "opportunities", "created_date", internship.id, "2024-05-01 10:00:00").await;
    backdate(&db, "opportunities", "created_date", assembly.id, "2024-01-15 10:00:00").await;
    // Ties with the leader; leaders come first among equal dates
    backdate(&db, "activities", "created_date", outreach.id, "2024-03-01 10:00:00").await;
    backdate(&db, "documents", "upload_date", minutes.id, "2024-04-20 10:00:00").await;

    let feed = FeedService::new(db.clone(), media.clone()).combined().await.unwrap();

    let summary: Vec<(&str, &str, Category)> = feed
        .iter()
        .map(|e| (e.title.as_str(), e.kind.as_str(), e.category))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Research internship", "opportunity", Category::Opportunity),
            ("AGM minutes", "document", Category::Document),
            ("Neema", "leadership", Category::Leadership),
            ("Village outreach", "activity", Category::Activity),
            ("General assembly", "announcement", Category::Announcement),
        ]
    );
    assert!(feed.windows(2).all(|w| w[0].date >= w[1].date));
}

#[tokio::test]
async fn feed_matches_stable_merge_of_store_lists() {
    let db = test_db().await;
    let media = FakeMediaStore::new();

    let leaders = LeaderStore::new(db.clone(), media.clone());
    let activities = ActivityStore::new(db.clone(), media.clone());
    let documents = DocumentStore::new(db.clone(), media.clone());
    let opportunities = OpportunityStore::new(db.clone(), media.clone());

    let stamps = ["2023-11-02 08:00:00", "2024-02-14 18:45:00", "2024-02-14 18:45:00"];

    for (i, stamp) in stamps.iter().enumerate() {
        let l = leaders
            .create(
                NewLeader {
                    name: format!("Leader {i}"),
                    position: "Member".to_string(),
                    bio: None,
                    order_index: i as i64,
                },
                Some(png("l.png")),
            )
            .await
            .unwrap();
        backdate(&db, "leaders", "created_date", l.id, stamp).await;

        let a = activities
            .create(
                NewActivity {
                    title: format!("Activity {i}"),
                    description: "Ward rounds".to_string(),
                    date: "2024-01-01".to_string(),
                    location: "Dodoma".to_string(),
                    author: Author::User,
                },
                None,
            )
            .await
            .unwrap();
        backdate(&db, "activities", "created_date", a.id, stamps[stamps.len() - 1 - i]).await;

        let d = documents
            .create(
                NewDocument {
                    title: format!("Doc {i}"),
                    category: "Reports".to_string(),
                    uploader: Author::User,
                },
                Some(pdf("r.pdf")),
            )
            .await
            .unwrap();
        backdate(&db, "documents", "upload_date", d.id, stamp).await;
    }

    let mut expected: Vec<FeedEntry> = leaders
        .list()
        .await
        .unwrap()
        .iter()
        .map(FeedEntry::from)
        .chain(opportunities.list().await.unwrap().iter().map(FeedEntry::from))
        .chain(activities.list().await.unwrap().iter().map(FeedEntry::from))
        .chain(documents.list().await.unwrap().iter().map(FeedEntry::from))
        .collect();
    expected.sort_by(|a, b| b.date.cmp(&a.date));

    let feed = FeedService::new(db, media).combined().await.unwrap();

    assert_eq!(feed.len(), 9);
    assert_eq!(feed, expected);
}
