//! Content validation for generated duas.
//!
//! Three independent checks run in order and the first failure wins:
//!
//! | Check | Fails when |
//! |-------|------------|
//! | Completeness | any required field is empty |
//! | Translation distinctness | the Urdu text is positionally >70% identical to the Arabic |
//! | Citation specificity | the reference is vague or names no recognised source |

use super::record::DuaRecord;

/// Urdu/Arabic similarity above this ratio is treated as a copy
pub const SIMILARITY_THRESHOLD: f64 = 0.7;

/// Phrases that mark a citation as vague or fabricated
const DISQUALIFYING_PHRASES: [&str; 4] = [
    "not explicitly mentioned",
    "derived from",
    "general spirit",
    "not found",
];

/// Tokens that name a recognised scriptural source
const QUALIFYING_TOKENS: [&str; 7] = [
    "quran", "hadith", "sahih", "sunan", "tirmidhi", "bukhari", "muslim",
];

/// Why a record failed validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    /// Required fields that were missing or empty, in check order
    MissingFields(Vec<&'static str>),
    /// The Urdu field repeats the Arabic text
    UrduCopiesArabic { similarity: f64 },
    /// The reference is vague or names no recognised source
    UnverifiableReference,
}

impl ValidationFailure {
    /// Whether a retry should ask for a proper Urdu translation
    pub fn concerns_urdu(&self) -> bool {
        matches!(self, ValidationFailure::UrduCopiesArabic { .. })
    }

    /// Whether a retry should ask for a specific citation
    ///
    /// A missing `reference` field counts as a citation problem too.
    pub fn concerns_reference(&self) -> bool {
        match self {
            ValidationFailure::UnverifiableReference => true,
            ValidationFailure::MissingFields(fields) => fields.contains(&"reference"),
            ValidationFailure::UrduCopiesArabic { .. } => false,
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            ValidationFailure::UrduCopiesArabic { .. } => write!(
                f,
                "The Urdu translation appears to be a copy of the Arabic text. \
                 Please provide a proper Urdu translation."
            ),
            ValidationFailure::UnverifiableReference => {
                write!(f, "The reference provided is not specific or authentic enough")
            }
        }
    }
}

/// Result of validating a candidate record
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationFailure),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Run all checks against a record and return the first failure.
pub fn validate(record: &DuaRecord) -> ValidationOutcome {
    if let Some(failure) = check_completeness(record)
        .or_else(|| check_translation_distinctness(record))
        .or_else(|| check_reference(&record.reference))
    {
        return ValidationOutcome::Invalid(failure);
    }
    ValidationOutcome::Valid
}

fn check_completeness(record: &DuaRecord) -> Option<ValidationFailure> {
    let missing: Vec<&'static str> = DuaRecord::REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| record.field(name).is_none_or(str::is_empty))
        .collect();

    (!missing.is_empty()).then_some(ValidationFailure::MissingFields(missing))
}

fn check_translation_distinctness(record: &DuaRecord) -> Option<ValidationFailure> {
    let arabic = strip_diacritics(&record.arabic_text);
    let urdu = strip_diacritics(&record.urdu_translation);
    let similarity = similarity(&arabic, &urdu);

    (similarity > SIMILARITY_THRESHOLD)
        .then_some(ValidationFailure::UrduCopiesArabic { similarity })
}

fn check_reference(reference: &str) -> Option<ValidationFailure> {
    let reference = reference.to_lowercase();

    let disqualified = DISQUALIFYING_PHRASES
        .iter()
        .any(|phrase| reference.contains(phrase));
    let qualified = QUALIFYING_TOKENS
        .iter()
        .any(|token| reference.contains(token));

    (disqualified || !qualified).then_some(ValidationFailure::UnverifiableReference)
}

/// Arabic combining marks (harakat, tanwin, shadda, sukun and friends)
fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

/// Remove Arabic diacritic combining marks (U+064B–U+065F, U+0670).
pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|c| !is_diacritic(*c)).collect()
}

/// Positional similarity of two strings over their shared prefix length.
///
/// Counts positions where both strings hold the same character, divided by
/// the shorter length. Returns 0.0 when either string is empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let shared = a.len().min(b.len());
    if shared == 0 {
        return 0.0;
    }

    let matches = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    matches as f64 / shared as f64
}
