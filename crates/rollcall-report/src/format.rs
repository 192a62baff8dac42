//! Number formatting shared by the Markdown renderers.

/// `1234567` → `"1,234,567"`.
pub fn thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

/// Always signed: `+1,204`, `-37`, `+0`.
pub fn signed_thousands(n: i64) -> String {
  let sign = if n < 0 { '-' } else { '+' };
  format!("{sign}{}", thousands(n.unsigned_abs()))
}

/// `count` as a percentage of `total`, rounded to two places and kept within
/// `[0, 100]`. A zero total yields zero.
pub fn percent(count: u64, total: u64) -> f64 {
  if total == 0 {
    return 0.0;
  }
  let pct = count as f64 / total as f64 * 100.0;
  ((pct * 100.0).round() / 100.0).clamp(0.0, 100.0)
}
