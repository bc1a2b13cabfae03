use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use rebill_core::{CompanyContext, CompanyId, Currency, Money, RecordId, UserId};
use rebill_expenses::{BillableExpense, ExpenseId, ExpenseRepository};
use rebill_ledger::{Party, PartyId, PartyKind};
use rebill_report::{PendingExpenseReport, ReportOptions};
use rebill_store::InMemoryDatabase;

fn seed_report(
    customers: usize,
    expenses_per_customer: usize,
) -> (
    PendingExpenseReport<Arc<InMemoryDatabase>, Arc<InMemoryDatabase>>,
    String,
) {
    let db = Arc::new(InMemoryDatabase::new());
    let company_id = CompanyId::new();
    let context = CompanyContext::new(company_id, UserId::new(), Currency::USD);

    let mut focus_id = String::new();
    for customer in 0..customers {
        let customer_id = PartyId::new(RecordId::new());
        db.insert_party(
            company_id,
            Party::new(
                customer_id,
                format!("Customer {customer:04}"),
                PartyKind::Customer,
            ),
        );
        if customer == 0 {
            focus_id = format!("partner_{customer_id}");
        }
        for expense in 0..expenses_per_customer {
            db.upsert(
                company_id,
                BillableExpense {
                    id: ExpenseId::new(RecordId::new()),
                    bill_id: None,
                    bill_line_id: None,
                    description: format!("Expense {expense}"),
                    amount: Money::from_minor_units(1000 + expense as i64, Currency::USD),
                    bill_date: None,
                    customer_id: Some(customer_id),
                    invoice_line_id: None,
                    is_outstanding: true,
                    source_document: String::new(),
                    supplier_id: None,
                },
            );
        }
    }

    (PendingExpenseReport::new(db.clone(), db, context), focus_id)
}

fn bench_build_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_report");
    for customers in [10usize, 100, 500] {
        let (report, _) = seed_report(customers, 10);
        let options = ReportOptions::default();
        group.throughput(Throughput::Elements(customers as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(customers),
            &customers,
            |b, _| {
                b.iter(|| black_box(report.build_report(&options, None).unwrap()));
            },
        );
    }
    group.finish();
}

fn bench_focused_build(c: &mut Criterion) {
    let (report, focus_id) = seed_report(500, 10);
    let options = ReportOptions::default();
    c.bench_function("build_report_focused", |b| {
        b.iter(|| black_box(report.build_report(&options, Some(&focus_id)).unwrap()));
    });
}

criterion_group!(benches, bench_build_report, bench_focused_build);
criterion_main!(benches);
