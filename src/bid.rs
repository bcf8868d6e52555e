// Bid - the record stored in the list
// One row of the monthly sales export, reduced to the four fields we query on

use std::fmt;

use crate::list::Keyed;

/// Bid - a single auction bid
///
/// `id` is the lookup key. Nothing enforces uniqueness; the list resolves
/// duplicates by taking the first match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bid {
    pub id: String,
    pub title: String,
    pub fund: String,
    pub amount: f64,
}

impl Bid {
    /// Create a new Bid with all fields set
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        fund: impl Into<String>,
        amount: f64,
    ) -> Self {
        Bid {
            id: id.into(),
            title: title.into(),
            fund: fund.into(),
            amount,
        }
    }

    /// The empty record (blank id)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

impl Keyed for Bid {
    fn key(&self) -> &str {
        &self.id
    }
}

// Amounts print in full ("1234567.89"), never in exponent form
impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {} | {}",
            self.id, self.title, self.amount, self.fund
        )
    }
}

// ============================================================================
// AMOUNT PARSING
// ============================================================================

/// Strip every `strip` character from `s` and parse what remains as a number
///
/// Convert-or-zero: surrounding whitespace is ignored, the longest numeric
/// prefix wins, and input with no numeric prefix gives `0.0`.
///
/// # Examples:
/// ```
/// use bid_list::str_to_double;
/// assert_eq!(str_to_double("$125.50", '$'), 125.50);
/// assert_eq!(str_to_double("$1,000", '$'), 1.0);
/// assert_eq!(str_to_double("n/a", '$'), 0.0);
/// ```
pub fn str_to_double(s: &str, strip: char) -> f64 {
    let cleaned: String = s.chars().filter(|&c| c != strip).collect();
    let cleaned = cleaned.trim();

    let end = numeric_prefix_len(cleaned);
    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

/// Length in bytes of the leading `[+-]digits[.digits][e[+-]digits]` run
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts if at least one digit follows it
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
