use std::env;

use credit_leads_api::db::Database;
use credit_leads_api::models::{NewConsultationRequest, NewCreditReportAnalysisRequest};
use credit_leads_api::storage::LeadStorage;

/// Integration smoke tests for the submission tables.
/// Marked ignored to avoid running against production by accident; set
/// TEST_DATABASE_URL to run.
fn database_url() -> anyhow::Result<String> {
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))
}

fn consultation_input(email: &str) -> NewConsultationRequest {
    NewConsultationRequest {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        phone: "0821234567".to_string(),
        primary_concern: Some("Debt Review Removal".to_string()),
        additional_details: None,
        consent_given: Some(true),
    }
}

#[tokio::test]
#[ignore]
async fn consultation_round_trip_and_ordering() -> anyhow::Result<()> {
    let db = Database::new(&database_url()?).await?;
    let storage = LeadStorage::new(db.pool.clone());

    let issued_at = chrono::Utc::now();
    let input = consultation_input("smoke-consultation@example.com");
    let created = storage
        .create_consultation_request(&input)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    // Stored record carries the input plus generated fields
    assert_eq!(created.first_name, input.first_name);
    assert_eq!(created.last_name, input.last_name);
    assert_eq!(created.email, input.email);
    assert_eq!(created.phone, input.phone);
    assert_eq!(created.primary_concern, input.primary_concern);
    assert!(created.consent_given);
    assert!(created.created_at + chrono::Duration::seconds(5) >= issued_at);

    let second = storage
        .create_consultation_request(&input)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    // Identical bodies produce distinct records; no deduplication
    assert_ne!(created.id, second.id);

    let listed = storage
        .list_consultation_requests()
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    assert!(listed.len() >= 2);
    // Newest first
    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
    Ok(())
}

#[tokio::test]
#[ignore]
async fn analysis_request_round_trip() -> anyhow::Result<()> {
    let db = Database::new(&database_url()?).await?;
    let storage = LeadStorage::new(db.pool.clone());

    let input = NewCreditReportAnalysisRequest {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        id_number: "9307245011085".to_string(),
        email: "smoke-analysis@example.com".to_string(),
        phone: "0821234567".to_string(),
        employer_name: Some("Acme Ltd".to_string()),
        monthly_income: Some("R25000".to_string()),
        primary_concern: None,
        consent_given: Some(true),
    };

    let created = storage
        .create_credit_report_analysis_request(&input)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    assert_eq!(created.id_number, input.id_number);
    assert_eq!(created.employer_name, input.employer_name);
    assert!(created.consent_given);

    let listed = storage
        .list_credit_report_analysis_requests()
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(listed.iter().any(|r| r.id == created.id));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn investigation_order_round_trip() -> anyhow::Result<()> {
    let db = Database::new(&database_url()?).await?;
    let storage = LeadStorage::new(db.pool.clone());

    let input = NewCreditReportAnalysisRequest {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        id_number: "9307245011085".to_string(),
        email: "smoke-order@example.com".to_string(),
        phone: "0821234567".to_string(),
        employer_name: None,
        monthly_income: None,
        primary_concern: None,
        consent_given: Some(true),
    };

    let order = storage
        .create_credit_investigation_order(&input, 75_000, "chk_smoke_test")
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    assert_eq!(order.amount_cents, 75_000);
    assert_eq!(order.payment_reference, "chk_smoke_test");
    assert_eq!(order.payment_status, "pending");

    let listed = storage
        .list_credit_investigation_orders()
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(listed.iter().any(|o| o.id == order.id));
    Ok(())
}
