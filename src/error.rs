use thiserror::Error;

/// Errors fer bad configuration an' the odd I/O mishap.
///
/// Sorting an' measuring never fail; everything here is raised before a
/// round starts or while talking tae the terminal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SortError {
    #[error("Och! '{input}' isnae a size ah can use - gie me a whole number, zero or mair")]
    InvalidSize { input: String },

    #[error("Haud yer horses! An array o' {size} is ower muckle - the limit is {max}")]
    SizeTooLarge { size: usize, max: usize },

    #[error("Invalid choice '{input}' - pick 1 (Random), 2 (Sorted) or 3 (Reverse)")]
    InvalidDistribution { input: String },

    #[error("Yer range {start}..{end} is aw wrang fer a sequence o' length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("That log filter's a guddle: '{spec}'")]
    InvalidLogFilter { spec: String },

    #[error("Environment variable {key} has a daft value: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("Jings! Something went awfy wrang wi' the terminal: {0}")]
    Io(String),
}

pub type SortResult<T> = Result<T, SortError>;

impl SortError {
    /// Configuration errors end an interactive session cleanly (exit 0).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SortError::InvalidSize { .. }
                | SortError::SizeTooLarge { .. }
                | SortError::InvalidDistribution { .. }
        )
    }
}

impl From<std::io::Error> for SortError {
    fn from(err: std::io::Error) -> Self {
        SortError::Io(err.to_string())
    }
}

/// Gie the user a wee hint on how tae fix their input
pub fn get_error_suggestion(error: &SortError) -> Option<&'static str> {
    match error {
        SortError::InvalidSize { input } => {
            if input.trim().starts_with('-') {
                Some("💡 Sizes cannae be negative - try somethin' like 20 or 1000.")
            } else if input.contains('.') {
                Some("💡 Nae fractions, please - an array has a whole number o' elements!")
            } else {
                None
            }
        }
        SortError::SizeTooLarge { .. } => {
            Some("💡 Bubble sort on a muckle array takes forever - set SORTBENCH_MAX_SIZE if ye really mean it.")
        }
        SortError::InvalidDistribution { input } => match input.trim().to_lowercase().as_str() {
            "random" | "r" => Some("💡 Did ye mean 1? That's Random."),
            "sorted" | "s" => Some("💡 Did ye mean 2? That's Sorted."),
            "reverse" | "reversed" => Some("💡 Did ye mean 3? That's Reverse."),
            _ => None,
        },
        _ => None,
    }
}

/// Scots phrases fer random error decoration
pub fn random_scots_exclamation() -> &'static str {
    use std::time::{SystemTime, UNIX_EPOCH};
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as usize)
        .unwrap_or(0);

    const PHRASES: &[&str] = &[
        "Och naw!",
        "Jings crivvens!",
        "Michty me!",
        "Hoots mon!",
        "Help ma boab!",
        "Whit a scunner!",
        "Dearie me!",
        "By the wee man!",
        "Whit a fankle!",
        "Sufferin' sporrans!",
    ];

    PHRASES[seed % PHRASES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors() {
        assert!(SortError::InvalidSize {
            input: "-3".to_string()
        }
        .is_config_error());
        assert!(SortError::InvalidDistribution {
            input: "7".to_string()
        }
        .is_config_error());
        assert!(SortError::SizeTooLarge { size: 10, max: 5 }.is_config_error());
        assert!(!SortError::Io("closed".to_string()).is_config_error());
        assert!(!SortError::InvalidRange {
            start: 3,
            end: 1,
            len: 5
        }
        .is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = SortError::InvalidRange {
            start: 2,
            end: 9,
            len: 4,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("2..9"));
        assert!(msg.contains("4"));

        let err = SortError::InvalidDistribution {
            input: "9".to_string(),
        };
        assert!(format!("{}", err).starts_with("Invalid choice"));
    }

    #[test]
    fn test_error_suggestions() {
        let err = SortError::InvalidSize {
            input: "-5".to_string(),
        };
        assert!(get_error_suggestion(&err).unwrap().contains("negative"));

        let err = SortError::InvalidDistribution {
            input: "Reverse".to_string(),
        };
        assert!(get_error_suggestion(&err).unwrap().contains('3'));
    }

    #[test]
    fn test_no_suggestion_for_unknown() {
        let err = SortError::InvalidSize {
            input: "banana".to_string(),
        };
        assert!(get_error_suggestion(&err).is_none());
        assert!(get_error_suggestion(&SortError::Io("x".to_string())).is_none());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe gone");
        let err: SortError = io.into();
        assert!(matches!(err, SortError::Io(msg) if msg.contains("pipe gone")));
    }

    #[test]
    fn test_exclamation_is_nonempty() {
        assert!(!random_scots_exclamation().is_empty());
    }
}
