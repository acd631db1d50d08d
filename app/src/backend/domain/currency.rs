//! Chilean peso formatting.

/// Format a whole-peso amount with `.` thousands separators and a leading `$`,
/// e.g. `300000` becomes `$300.000`. Negative amounts keep the sign in front
/// of the symbol (`-$1.500`).
pub fn format_clp(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
