//! Round trips against a live MySQL `client_schedule` database.
//!
//! Run with: MYSQL_SCHEDULER_DB_* set, cargo test -p scheduler-store -- --ignored

use chrono::{Duration, TimeZone, Timelike, Utc};
use scheduler_core::model::{NewAppointment, NewContact, NewCustomer, NewUser, AUDIT_AUTHOR};
use scheduler_core::store::Daos;
use scheduler_store::{connect, daos, schema, DbCredentials};

async fn setup() -> Daos {
    let creds = DbCredentials::from_env().expect("MYSQL_SCHEDULER_DB_* required");
    let pool = connect(&creds).await.expect("pool creation failed");
    schema::run(&pool).await.expect("schema bootstrap failed");
    schema::seed(&pool).await.expect("seed failed");
    daos(&pool)
}

#[tokio::test]
#[ignore = "requires database"]
async fn contact_create_read_delete() {
    let daos = setup().await;
    let draft = NewContact {
        name: format!("Roundtrip {}", Utc::now().timestamp_micros()),
        email: "roundtrip@example.com".into(),
    };

    let created = daos.contacts.create(&draft).await.unwrap();
    assert_eq!(created.email, draft.email);

    let by_name = daos.contacts.read_by_name(&draft.name).await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);

    assert!(daos.contacts.delete(created.id).await.unwrap());
    assert!(daos.contacts.read(created.id).await.unwrap().is_none());
    assert!(!daos.contacts.delete(created.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn appointment_times_come_back_as_utc() {
    let daos = setup().await;

    let user = daos
        .users
        .create(&NewUser {
            username: format!("rt-{}", Utc::now().timestamp_micros()),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(user.audit.created_by, AUDIT_AUTHOR);

    let division = daos.divisions.read_by_name("Ohio").await.unwrap().unwrap();
    let customer = daos
        .customers
        .create(&NewCustomer {
            name: format!("Roundtrip Co {}", user.id),
            address: "1 Test Way".into(),
            postal_code: "43004".into(),
            phone: "555-0100".into(),
            division_id: division.id,
        })
        .await
        .unwrap();
    let contact = daos.contacts.read(1).await.unwrap().unwrap();

    let start = Utc.with_ymd_and_hms(2030, 5, 6, 14, 30, 0).unwrap();
    let draft = NewAppointment {
        title: format!("Roundtrip {}", user.id),
        description: "db test".into(),
        location: "nowhere".into(),
        kind: "Test".into(),
        start,
        end: start + Duration::minutes(45),
        customer_id: customer.id,
        user_id: user.id,
        contact_id: contact.id,
    };

    let created = daos.appointments.create(&draft).await.unwrap();
    assert_eq!(created.start, start);
    assert_eq!(created.end.minute(), 15);

    let mut moved = draft.clone();
    moved.start = start + Duration::hours(1);
    moved.end = moved.start + Duration::minutes(45);
    let updated = daos
        .appointments
        .update(created.id, &moved)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.start, moved.start);

    assert!(daos.appointments.update(-1, &moved).await.unwrap().is_none());

    assert!(daos.appointments.delete(created.id).await.unwrap());
    assert!(daos.customers.delete(customer.id).await.unwrap());
    assert!(daos.users.delete(user.id).await.unwrap());
}
