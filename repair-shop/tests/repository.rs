mod common;

use architecture::repository::{MutableRepository, ReadOnlyRepository};
use chrono::{DateTime, Duration, TimeZone, Utc};
use domain_repair::{
    command::{UpdateCustomerCommand, UpdateWorkOrderCommand},
    exception::RepairException,
    model::{
        entity::{Customer, User, WorkOrder},
        vo::{Priority, WorkOrderStatus},
    },
    repository::{CustomerRepo, UserRepo, WorkOrderRepo},
};
use repair_shop::infrastructure::OrmRepo;
use uuid::Uuid;

async fn repo() -> OrmRepo {
    let sp = common::service_provider().await;
    OrmRepo::builder().db(sp.database.clone()).build()
}

fn user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        full_name: "Staff".to_string(),
        created_at: Utc::now(),
    }
}

fn customer(email: Option<&str>) -> Customer {
    let now = Utc::now();
    Customer {
        id: Uuid::new_v4(),
        name: "Bob".to_string(),
        phone: None,
        email: email.map(str::to_string),
        address: Some("1 Main St".to_string()),
        created_at: now,
        updated_at: now,
    }
}

fn work_order(
    customer_id: Uuid,
    created_by_id: Uuid,
    status: WorkOrderStatus,
    amount: f64,
    created_at: DateTime<Utc>,
) -> WorkOrder {
    WorkOrder {
        id: Uuid::new_v4(),
        customer_id,
        created_by_id,
        assigned_to_id: None,
        title: "Battery swap".to_string(),
        description: "Battery drains fast".to_string(),
        device_type: "Phone".to_string(),
        brand: "Samsung".to_string(),
        model: "S20".to_string(),
        serial_number: "R58N".to_string(),
        problem: "Battery".to_string(),
        priority: Priority::Low,
        status,
        start_date: None,
        end_date: None,
        amount: Some(amount),
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn duplicate_email_is_a_constraint_violation() {
    let repo = repo().await;
    repo.insert(&user("alice@example.com")).await.unwrap();
    let err = MutableRepository::<User>::insert(&repo, &user("alice@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        RepairException::from(err),
        RepairException::ConstraintViolation { .. }
    ));
    assert!(repo.get_by_email("alice@example.com").await.unwrap().is_some());
    assert!(repo.get_by_email("ALICE@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn customer_patch_writes_only_present_fields() {
    let repo = repo().await;
    let stored = customer(Some("bob@example.com"));
    MutableRepository::<Customer>::insert(&repo, &stored).await.unwrap();

    let command = UpdateCustomerCommand {
        address: Some(None),
        phone: Some(Some("0899999999".to_string())),
        ..Default::default()
    };
    let later = stored.updated_at + Duration::minutes(5);
    assert!(CustomerRepo::update_fields(&repo, stored.id, &command, later).await.unwrap());
    let updated = ReadOnlyRepository::<Customer>::get_by_id(&repo, stored.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Bob");
    assert_eq!(updated.email.as_deref(), Some("bob@example.com"));
    assert_eq!(updated.phone.as_deref(), Some("0899999999"));
    assert_eq!(updated.address, None);
    assert_eq!(updated.created_at, stored.created_at);
    assert_eq!(updated.updated_at, later);

    assert!(!CustomerRepo::update_fields(&repo, Uuid::new_v4(), &command, later).await.unwrap());
}

#[tokio::test]
async fn income_queries_use_half_open_windows() {
    let repo = repo().await;
    let alice = user("alice@example.com");
    let bob = user("bob@example.com");
    repo.insert(&alice).await.unwrap();
    repo.insert(&bob).await.unwrap();
    let shop_customer = customer(None);
    MutableRepository::<Customer>::insert(&repo, &shop_customer).await.unwrap();

    let from = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();
    let orders = [
        work_order(shop_customer.id, alice.id, WorkOrderStatus::Completed, 1000.0, from),
        work_order(shop_customer.id, alice.id, WorkOrderStatus::InProgress, 300.0, from),
        // Belongs to the next month.
        work_order(shop_customer.id, alice.id, WorkOrderStatus::Completed, 50.0, to),
        work_order(
            shop_customer.id,
            alice.id,
            WorkOrderStatus::Completed,
            20.0,
            to - Duration::seconds(1),
        ),
        {
            let mut assigned =
                work_order(shop_customer.id, bob.id, WorkOrderStatus::Completed, 7.0, from);
            assigned.assigned_to_id = Some(alice.id);
            assigned
        },
    ];
    for order in &orders {
        MutableRepository::<WorkOrder>::insert(&repo, order).await.unwrap();
    }

    let completed = repo.sum_completed_income(alice.id, from, to).await.unwrap();
    assert_eq!(completed, 1027.0);
    assert_eq!(repo.sum_completed_income(bob.id, from, to).await.unwrap(), 7.0);
    let empty_from = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(repo.sum_completed_income(alice.id, empty_from, from).await.unwrap(), 0.0);

    let records = repo.get_income_records(alice.id, from, to).await.unwrap();
    let total: f64 = records.iter().filter_map(|r| r.amount).sum();
    assert_eq!(records.len(), 3);
    assert_eq!(total, 1320.0);
}

#[tokio::test]
async fn visible_work_orders_come_newest_first_with_details() {
    let repo = repo().await;
    let alice = user("alice@example.com");
    let bob = user("bob@example.com");
    repo.insert(&alice).await.unwrap();
    repo.insert(&bob).await.unwrap();
    let shop_customer = customer(None);
    MutableRepository::<Customer>::insert(&repo, &shop_customer).await.unwrap();

    let now = Utc::now();
    let older = work_order(shop_customer.id, alice.id, WorkOrderStatus::Pending, 0.0, now - Duration::days(1));
    let mut newer = work_order(shop_customer.id, bob.id, WorkOrderStatus::Pending, 0.0, now);
    newer.assigned_to_id = Some(alice.id);
    let hidden = work_order(shop_customer.id, bob.id, WorkOrderStatus::Pending, 0.0, now);
    for order in [&older, &newer, &hidden] {
        MutableRepository::<WorkOrder>::insert(&repo, order).await.unwrap();
    }

    let visible = repo.get_visible_to(alice.id, None).await.unwrap();
    let ids = visible.iter().map(|d| d.work_order.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert_eq!(visible[0].created_by.as_ref().unwrap().email, "bob@example.com");
    assert_eq!(visible[0].assigned_to.as_ref().unwrap().email, "alice@example.com");
    assert_eq!(visible[0].customer.as_ref().unwrap().name, "Bob");
    assert_eq!(repo.get_visible_to(alice.id, Some(1)).await.unwrap().len(), 1);

    let customers = repo.get_all_with_work_orders().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].work_order_count, 3);
    assert_eq!(customers[0].work_orders.last().unwrap().id, older.id);
}

#[tokio::test]
async fn work_order_patch_can_clear_the_assignee() {
    let repo = repo().await;
    let alice = user("alice@example.com");
    repo.insert(&alice).await.unwrap();
    let shop_customer = customer(None);
    MutableRepository::<Customer>::insert(&repo, &shop_customer).await.unwrap();
    let mut order =
        work_order(shop_customer.id, alice.id, WorkOrderStatus::Pending, 0.0, Utc::now());
    order.assigned_to_id = Some(alice.id);
    MutableRepository::<WorkOrder>::insert(&repo, &order).await.unwrap();

    let command = UpdateWorkOrderCommand {
        assigned_to_id: Some(None),
        status: Some(WorkOrderStatus::InProgress),
        ..Default::default()
    };
    assert!(WorkOrderRepo::update_fields(&repo, order.id, &command, Utc::now()).await.unwrap());
    let detail = repo.get_detail(order.id).await.unwrap().unwrap();
    assert_eq!(detail.work_order.assigned_to_id, None);
    assert!(detail.assigned_to.is_none());
    assert_eq!(detail.work_order.status, WorkOrderStatus::InProgress);
    assert_eq!(detail.work_order.priority, Priority::Low);
}
