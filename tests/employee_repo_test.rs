//! Repository and Unit of Work integration tests.
//!
//! These run the real migrations against in-memory SQLite, so the
//! keyset pagination, uniqueness and transaction paths are exercised
//! end to end.

use sea_orm::ConnectOptions;

use employee_api::domain::EmployeeInput;
use employee_api::errors::AppError;
use employee_api::infra::{Migrator, Persistence, UnitOfWork};
use employee_api::types::{Cursor, ListQuery};
use employee_api::with_transaction;
use sea_orm_migration::MigratorTrait;

async fn setup() -> Persistence {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);

    let conn = sea_orm::Database::connect(options)
        .await
        .expect("sqlite connect");
    Migrator::up(&conn, None).await.expect("migrations");

    Persistence::new(conn)
}

fn input(first: &str, last: &str, email: &str) -> EmployeeInput {
    EmployeeInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        mobile: "+15550100".to_string(),
        role: "engineer".to_string(),
    }
}

async fn create(uow: &Persistence, value: EmployeeInput) -> employee_api::domain::Employee {
    with_transaction!(uow, |ctx| ctx.employees().create(value).await).expect("create")
}

fn search(term: &str) -> ListQuery {
    ListQuery {
        search: Some(term.to_string()),
        cursor: None,
    }
}

#[tokio::test]
async fn create_then_find_round_trips() {
    let uow = setup().await;
    let created = create(&uow, input("Alice", "Nguyen", "alice@example.com")).await;

    let found = uow
        .employees()
        .find_by_id(created.id)
        .await
        .unwrap()
        .expect("employee exists");

    assert_eq!(found, created);
    assert_eq!(found.display_name(), "Alice Nguyen");
}

#[tokio::test]
async fn duplicate_email_yields_exactly_one_row() {
    let uow = setup().await;
    create(&uow, input("Alice", "Nguyen", "alice@example.com")).await;

    let second = with_transaction!(uow, |ctx| {
        ctx.employees()
            .create(input("Other", "Person", "alice@example.com"))
            .await
    });
    assert!(matches!(second.unwrap_err(), AppError::Conflict(_)));

    let page = uow.employees().list(&ListQuery::default()).await.unwrap();
    assert_eq!(page.results.len(), 1);
}

#[tokio::test]
async fn replace_overwrites_fields_but_not_created_at() {
    let uow = setup().await;
    let created = create(&uow, input("Alice", "Nguyen", "alice@example.com")).await;

    let updated = with_transaction!(uow, |ctx| {
        let mut replacement = input("Alicia", "Nguyen", "alicia@example.com");
        replacement.role = "manager".to_string();
        ctx.employees().replace(created.id, replacement).await
    })
    .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.first_name, "Alicia");
    assert_eq!(updated.email, "alicia@example.com");
    assert_eq!(updated.role, "manager");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn replace_missing_id_is_not_found() {
    let uow = setup().await;

    let result = with_transaction!(uow, |ctx| {
        ctx.employees()
            .replace(999, input("Alice", "Nguyen", "alice@example.com"))
            .await
    });

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn replace_to_colliding_email_conflicts() {
    let uow = setup().await;
    create(&uow, input("Alice", "Nguyen", "alice@example.com")).await;
    let bob = create(&uow, input("Bob", "Smith", "bob@example.com")).await;

    let result = with_transaction!(uow, |ctx| {
        ctx.employees()
            .replace(bob.id, input("Bob", "Smith", "alice@example.com"))
            .await
    });

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn delete_is_not_found_the_second_time() {
    let uow = setup().await;
    let created = create(&uow, input("Alice", "Nguyen", "alice@example.com")).await;

    assert!(uow.employees().delete(created.id).await.is_ok());

    let second = uow.employees().delete(created.id).await;
    assert!(matches!(second.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn list_is_newest_first_and_pages_do_not_overlap() {
    let uow = setup().await;
    for i in 0..25 {
        create(
            &uow,
            input("Employee", "Number", &format!("e{:02}@example.com", i)),
        )
        .await;
    }

    let page1 = uow.employees().list(&ListQuery::default()).await.unwrap();
    assert_eq!(page1.results.len(), 10);
    assert!(page1.previous.is_none());

    // Newest first: (created_at, id) strictly decreasing
    for pair in page1.results.windows(2) {
        let key = |e: &employee_api::domain::Employee| (e.created_at, e.id);
        assert!(key(&pair[0]) > key(&pair[1]));
    }

    let cursor = Cursor::decode(page1.next.as_deref().expect("next cursor")).unwrap();
    let page2 = uow
        .employees()
        .list(&ListQuery {
            search: None,
            cursor: Some(cursor),
        })
        .await
        .unwrap();
    assert_eq!(page2.results.len(), 10);

    let ids1: Vec<i32> = page1.results.iter().map(|e| e.id).collect();
    let ids2: Vec<i32> = page2.results.iter().map(|e| e.id).collect();
    assert!(ids1.iter().all(|id| !ids2.contains(id)));

    // Last page holds the remaining 5 rows and no next cursor
    let cursor3 = Cursor::decode(page2.next.as_deref().expect("next cursor")).unwrap();
    let page3 = uow
        .employees()
        .list(&ListQuery {
            search: None,
            cursor: Some(cursor3),
        })
        .await
        .unwrap();
    assert_eq!(page3.results.len(), 5);
    assert!(page3.next.is_none());
    assert!(page3.previous.is_some());
}

#[tokio::test]
async fn cursor_is_stable_under_concurrent_inserts() {
    let uow = setup().await;
    for i in 0..15 {
        create(
            &uow,
            input("Employee", "Number", &format!("e{:02}@example.com", i)),
        )
        .await;
    }

    let page1 = uow.employees().list(&ListQuery::default()).await.unwrap();
    let cursor = Cursor::decode(page1.next.as_deref().unwrap()).unwrap();

    let page2_before = uow
        .employees()
        .list(&ListQuery {
            search: None,
            cursor: Some(cursor),
        })
        .await
        .unwrap();

    // A row inserted at the head must not shift the cursor chain
    create(&uow, input("New", "Hire", "newest@example.com")).await;

    let page2_after = uow
        .employees()
        .list(&ListQuery {
            search: None,
            cursor: Some(cursor),
        })
        .await
        .unwrap();

    let ids = |page: &employee_api::types::EmployeePage| {
        page.results.iter().map(|e| e.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(&page2_before), ids(&page2_after));
}

#[tokio::test]
async fn previous_cursor_returns_the_prior_page() {
    let uow = setup().await;
    for i in 0..15 {
        create(
            &uow,
            input("Employee", "Number", &format!("e{:02}@example.com", i)),
        )
        .await;
    }

    let page1 = uow.employees().list(&ListQuery::default()).await.unwrap();
    let next = Cursor::decode(page1.next.as_deref().unwrap()).unwrap();

    let page2 = uow
        .employees()
        .list(&ListQuery {
            search: None,
            cursor: Some(next),
        })
        .await
        .unwrap();
    let previous = Cursor::decode(page2.previous.as_deref().expect("previous cursor")).unwrap();
    assert!(previous.reverse);

    let back = uow
        .employees()
        .list(&ListQuery {
            search: None,
            cursor: Some(previous),
        })
        .await
        .unwrap();

    let ids = |page: &employee_api::types::EmployeePage| {
        page.results.iter().map(|e| e.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(&back), ids(&page1));
    assert!(back.previous.is_none());
    assert!(back.next.is_some());
}

#[tokio::test]
async fn search_matches_names_and_email_case_insensitively() {
    let uow = setup().await;
    create(&uow, input("Alice", "Nguyen", "alice@example.com")).await;
    create(&uow, input("Bob", "Smith", "bob@example.com")).await;

    let page = uow.employees().list(&search("ALICE")).await.unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].first_name, "Alice");

    // Substring of last name
    let page = uow.employees().list(&search("guy")).await.unwrap();
    assert_eq!(page.results.len(), 1);

    // Substring of email
    let page = uow.employees().list(&search("bob@")).await.unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].first_name, "Bob");

    let page = uow.employees().list(&search("zzz")).await.unwrap();
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn like_wildcards_are_matched_literally() {
    let uow = setup().await;
    create(&uow, input("Alice", "Nguyen", "alice@example.com")).await;

    let page = uow.employees().list(&search("%")).await.unwrap();
    assert!(page.results.is_empty());

    let page = uow.employees().list(&search("_")).await.unwrap();
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn role_counts_group_and_sort_by_role() {
    let uow = setup().await;
    create(&uow, input("Alice", "Nguyen", "alice@example.com")).await;
    create(&uow, input("Bob", "Smith", "bob@example.com")).await;

    let mut manager = input("Carol", "Jones", "carol@example.com");
    manager.role = "manager".to_string();
    create(&uow, manager).await;

    let counts = uow.employees().role_counts().await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].role, "engineer");
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].role, "manager");
    assert_eq!(counts[1].count, 1);
}
