//! Current-month activity summary shown on the home screen.

use chrono::{Datelike, NaiveDate};
use shared::{ExpenseRecord, MaintenanceRecord, MonthlySummary};

use super::dates::parse_date;

fn in_month(date_text: &str, today: NaiveDate) -> bool {
    parse_date(date_text)
        .map(|date| date.year() == today.year() && date.month() == today.month())
        .unwrap_or(false)
}

/// Sum the expenses and count the services dated in `today`'s calendar month.
/// Records whose date does not parse are left out.
pub fn monthly_summary(
    expenses: &[ExpenseRecord],
    maintenance: &[MaintenanceRecord],
    today: NaiveDate,
) -> MonthlySummary {
    let month_expenses: Vec<&ExpenseRecord> = expenses
        .iter()
        .filter(|expense| in_month(&expense.date, today))
        .collect();

    let maintenance_count = maintenance
        .iter()
        .filter(|record| in_month(&record.date, today))
        .count();

    MonthlySummary {
        month: today.month(),
        year: today.year(),
        total_spent: month_expenses.iter().map(|expense| expense.amount).sum(),
        expense_count: month_expenses.len(),
        maintenance_count,
    }
}
