//! End-to-end tests for the expense write path over the in-memory database.

use std::sync::Arc;

use chrono::NaiveDate;

use rebill_core::{
    CompanyContext, CompanyId, Currency, DomainError, Money, RecordId, UserId, format_amount,
};
use rebill_expenses::{
    BillableExpense, ExpenseChanges, ExpenseId, ExpenseRepository, Expenses, MessageCategory,
};
use rebill_ledger::{
    Bill, BillId, BillLine, BillLineId, CustomerInvoice, InvoiceId, InvoiceLine, InvoiceLineId,
    InvoiceState, Party, PartyId, PartyKind,
};

use crate::database::InMemoryDatabase;

type TestExpenses = Expenses<Arc<InMemoryDatabase>, Arc<InMemoryDatabase>, Arc<InMemoryDatabase>>;

fn setup() -> (Arc<InMemoryDatabase>, TestExpenses, CompanyId) {
    rebill_observability::init();
    let db = Arc::new(InMemoryDatabase::new());
    let company_id = CompanyId::new();
    let context = CompanyContext::new(company_id, UserId::new(), Currency::USD);
    let service = Expenses::new(db.clone(), db.clone(), db.clone(), context);
    (db, service, company_id)
}

fn seed_customer(db: &InMemoryDatabase, company_id: CompanyId, name: &str) -> PartyId {
    let id = PartyId::new(RecordId::new());
    db.insert_party(company_id, Party::new(id, name, PartyKind::Customer));
    id
}

fn seed_bill(
    db: &InMemoryDatabase,
    company_id: CompanyId,
    description: &str,
    minor_units: i64,
) -> (BillId, BillLineId) {
    let supplier_id = PartyId::new(RecordId::new());
    db.insert_party(
        company_id,
        Party::new(supplier_id, "Fleet Supplies", PartyKind::Supplier),
    );

    let bill_id = BillId::new(RecordId::new());
    let line_id = BillLineId::new(RecordId::new());
    db.insert_bill(
        company_id,
        Bill {
            id: bill_id,
            number: Some(format!("BILL/2026/{:04}", minor_units % 10_000)),
            supplier_id,
            date: NaiveDate::from_ymd_opt(2026, 3, 14),
            lines: vec![BillLine {
                id: line_id,
                description: description.to_string(),
                amount: Money::from_minor_units(minor_units, Currency::USD),
            }],
        },
    );
    (bill_id, line_id)
}

fn seed_draft_invoice(
    db: &InMemoryDatabase,
    company_id: CompanyId,
    customer_id: PartyId,
    minor_units: i64,
) -> (InvoiceId, InvoiceLineId) {
    let invoice_id = InvoiceId::new(RecordId::new());
    let line_id = InvoiceLineId::new(RecordId::new());
    db.insert_invoice(
        company_id,
        CustomerInvoice {
            id: invoice_id,
            customer_id,
            state: InvoiceState::Draft,
            lines: vec![InvoiceLine {
                id: line_id,
                description: "Re-billed expense".to_string(),
                amount: Money::from_minor_units(minor_units, Currency::USD),
            }],
        },
    );
    (invoice_id, line_id)
}

#[test]
fn registering_a_bill_line_creates_an_outstanding_expense() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Taxi fare", 4250);

    let expense_id = expenses.register_from_bill_line(bill_id, line_id).unwrap();

    let expense = db.get(company_id, &expense_id).unwrap();
    assert_eq!(expense.bill_id, Some(bill_id));
    assert_eq!(expense.bill_line_id, Some(line_id));
    assert_eq!(expense.description, "Taxi fare");
    assert_eq!(expense.amount.minor_units(), 4250);
    assert_eq!(expense.amount.currency(), Currency::USD);
    assert!(expense.is_outstanding);
    assert_eq!(expense.source_document, "BILL/2026/4250");
    assert!(expense.supplier_id.is_some());
    assert_eq!(expense.customer_id, None);
}

#[test]
fn registering_the_same_bill_line_twice_is_a_conflict() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Taxi fare", 4250);

    expenses.register_from_bill_line(bill_id, line_id).unwrap();
    let err = expenses
        .register_from_bill_line(bill_id, line_id)
        .unwrap_err();
    match err {
        DomainError::Conflict(msg) => assert!(msg.contains("already")),
        _ => panic!("Expected Conflict for duplicate registration"),
    }
}

#[test]
fn registering_against_a_missing_bill_is_not_found() {
    let (_db, expenses, _company_id) = setup();
    let err = expenses
        .register_from_bill_line(
            BillId::new(RecordId::new()),
            BillLineId::new(RecordId::new()),
        )
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}

#[test]
fn assigning_a_customer_posts_an_assigned_message() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Taxi fare", 4250);
    let customer_id = seed_customer(&db, company_id, "Acme Corp");

    let expense_id = expenses.register_from_bill_line(bill_id, line_id).unwrap();
    expenses
        .update(&[expense_id], ExpenseChanges::customer(Some(customer_id)))
        .unwrap();

    let feed = db.messages(company_id, &bill_id);
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].category, MessageCategory::BillableExpense);
    assert_eq!(
        feed[0].body,
        format!(
            "Billable expense Taxi fare {} assigned to Acme Corp",
            format_amount(4250, Currency::USD)
        )
    );

    let expense = db.get(company_id, &expense_id).unwrap();
    assert_eq!(expense.customer_id, Some(customer_id));
}

#[test]
fn reassigning_and_removing_post_their_own_messages() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Taxi fare", 4250);
    let first = seed_customer(&db, company_id, "Acme Corp");
    let second = seed_customer(&db, company_id, "Beta LLC");

    let expense_id = expenses.register_from_bill_line(bill_id, line_id).unwrap();
    expenses
        .update(&[expense_id], ExpenseChanges::customer(Some(first)))
        .unwrap();
    expenses
        .update(&[expense_id], ExpenseChanges::customer(Some(second)))
        .unwrap();
    expenses
        .update(&[expense_id], ExpenseChanges::customer(None))
        .unwrap();

    let feed = db.messages(company_id, &bill_id);
    let amount = format_amount(4250, Currency::USD);
    assert_eq!(feed.len(), 3);
    assert!(feed[0].body.ends_with("assigned to Acme Corp"));
    assert!(feed[1].body.ends_with("re-assigned to Beta LLC"));
    assert_eq!(feed[2].body, format!("Billable expense Taxi fare {amount} removed"));
}

#[test]
fn changing_the_customer_detaches_the_invoice_link() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Taxi fare", 4250);
    let first = seed_customer(&db, company_id, "Acme Corp");
    let second = seed_customer(&db, company_id, "Beta LLC");

    let expense_id = expenses.register_from_bill_line(bill_id, line_id).unwrap();
    expenses
        .update(&[expense_id], ExpenseChanges::customer(Some(first)))
        .unwrap();
    let (_invoice_id, invoice_line_id) = seed_draft_invoice(&db, company_id, first, 4250);
    expenses
        .update(&[expense_id], ExpenseChanges::invoice_line(invoice_line_id))
        .unwrap();
    assert!(db.get(company_id, &expense_id).unwrap().invoice_line_id.is_some());

    // The changeset never mentions the invoice line; the rule clears it anyway.
    expenses
        .update(&[expense_id], ExpenseChanges::customer(Some(second)))
        .unwrap();

    let expense = db.get(company_id, &expense_id).unwrap();
    assert_eq!(expense.invoice_line_id, None);
    assert!(expense.is_outstanding);
}

#[test]
fn non_customer_updates_skip_the_audit_log() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Taxi fare", 4250);

    let expense_id = expenses.register_from_bill_line(bill_id, line_id).unwrap();
    let updated = expenses
        .update(
            &[expense_id],
            ExpenseChanges {
                description: Some("Airport taxi".to_string()),
                ..ExpenseChanges::default()
            },
        )
        .unwrap();

    assert_eq!(updated, 1);
    assert!(db.messages(company_id, &bill_id).is_empty());
    assert_eq!(
        db.get(company_id, &expense_id).unwrap().description,
        "Airport taxi"
    );
}

#[test]
fn expenses_without_a_bill_skip_posting() {
    let (db, expenses, company_id) = setup();
    let customer_id = seed_customer(&db, company_id, "Acme Corp");

    let expense_id = ExpenseId::new(RecordId::new());
    db.upsert(
        company_id,
        BillableExpense {
            id: expense_id,
            bill_id: None,
            bill_line_id: None,
            description: "Manual entry".to_string(),
            amount: Money::from_minor_units(1000, Currency::USD),
            bill_date: None,
            customer_id: None,
            invoice_line_id: None,
            is_outstanding: true,
            source_document: String::new(),
            supplier_id: None,
        },
    );

    let updated = expenses
        .update(&[expense_id], ExpenseChanges::customer(Some(customer_id)))
        .unwrap();

    // Update applies; there is just no feed to post to.
    assert_eq!(updated, 1);
    assert_eq!(
        db.get(company_id, &expense_id).unwrap().customer_id,
        Some(customer_id)
    );
}

#[test]
fn finalizing_the_invoice_clears_the_outstanding_flag() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Taxi fare", 4250);
    let customer_id = seed_customer(&db, company_id, "Acme Corp");

    let expense_id = expenses.register_from_bill_line(bill_id, line_id).unwrap();
    expenses
        .update(&[expense_id], ExpenseChanges::customer(Some(customer_id)))
        .unwrap();
    let (invoice_id, invoice_line_id) = seed_draft_invoice(&db, company_id, customer_id, 4250);
    expenses
        .update(&[expense_id], ExpenseChanges::invoice_line(invoice_line_id))
        .unwrap();

    // Still outstanding while the invoice is a draft.
    assert!(db.get(company_id, &expense_id).unwrap().is_outstanding);

    db.set_invoice_state(company_id, invoice_id, InvoiceState::Open)
        .unwrap();
    assert!(!db.get(company_id, &expense_id).unwrap().is_outstanding);
}

#[test]
fn messages_use_the_company_currency_not_the_expense_currency() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Hotel night", 9900);
    let customer_id = seed_customer(&db, company_id, "Acme Corp");

    let expense_id = expenses.register_from_bill_line(bill_id, line_id).unwrap();
    let mut expense = db.get(company_id, &expense_id).unwrap();
    expense.amount = Money::from_minor_units(9900, Currency::EUR);
    db.upsert(company_id, expense);

    expenses
        .update(&[expense_id], ExpenseChanges::customer(Some(customer_id)))
        .unwrap();

    let feed = db.messages(company_id, &bill_id);
    assert!(feed[0].body.contains(&format_amount(9900, Currency::USD)));
    assert!(!feed[0].body.contains(&format_amount(9900, Currency::EUR)));
}

#[test]
fn updating_many_expenses_posts_one_message_each() {
    let (db, expenses, company_id) = setup();
    let (first_bill, first_line) = seed_bill(&db, company_id, "Taxi fare", 4250);
    let (second_bill, second_line) = seed_bill(&db, company_id, "Hotel night", 9900);
    let customer_id = seed_customer(&db, company_id, "Acme Corp");

    let first = expenses.register_from_bill_line(first_bill, first_line).unwrap();
    let second = expenses
        .register_from_bill_line(second_bill, second_line)
        .unwrap();

    let updated = expenses
        .update(&[first, second], ExpenseChanges::customer(Some(customer_id)))
        .unwrap();

    assert_eq!(updated, 2);
    assert_eq!(db.messages(company_id, &first_bill).len(), 1);
    assert_eq!(db.messages(company_id, &second_bill).len(), 1);
}

#[test]
fn assigning_an_unknown_customer_applies_nothing() {
    let (db, expenses, company_id) = setup();
    let (bill_id, line_id) = seed_bill(&db, company_id, "Taxi fare", 4250);

    let expense_id = expenses.register_from_bill_line(bill_id, line_id).unwrap();
    let err = expenses
        .update(
            &[expense_id],
            ExpenseChanges::customer(Some(PartyId::new(RecordId::new()))),
        )
        .unwrap_err();

    assert_eq!(err, DomainError::NotFound);
    let expense = db.get(company_id, &expense_id).unwrap();
    assert_eq!(expense.customer_id, None);
    assert!(db.messages(company_id, &bill_id).is_empty());
}

#[test]
fn updating_a_missing_expense_is_not_found() {
    let (_db, expenses, _company_id) = setup();
    let err = expenses
        .update(
            &[ExpenseId::new(RecordId::new())],
            ExpenseChanges::customer(None),
        )
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}
