use crate::{fastmile::UsedData, ScrapeError};
use lazy_regex::regex_find;

const CA_NOT_AVAILABLE: &str = "CA Not Available";

/// Placeholder values such as `-` are common on the status page, so a
/// malformed integer is an absent value rather than an error.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// `::` is what the device prints for an unconfigured address.
pub fn parse_ip(text: &str) -> Option<String> {
    if text == "::" {
        None
    } else {
        Some(text.to_string())
    }
}

pub fn parse_used_data(text: &str) -> Option<UsedData> {
    let text = text.to_uppercase();
    let unit = regex_find!(r"[A-Z]+", &text)?;
    let value = text.replace(unit, "").trim().parse().ok()?;
    Some(UsedData {
        value,
        unit: unit.to_string(),
    })
}

/// Parses the aggregated bands of a `B3+B7` style list. `context` names the
/// element the text came from and ends up in the error.
pub fn parse_band_list(text: &str, context: &str) -> Result<Vec<i64>, ScrapeError> {
    let text = text.trim();
    if text == CA_NOT_AVAILABLE {
        return Ok(vec![]);
    }

    text.split('+')
        .map(|token| {
            let token = token.trim();
            token
                .strip_prefix('B')
                .unwrap_or(token)
                .parse()
                .map_err(|_| ScrapeError::MalformedBandToken {
                    context: context.to_string(),
                    token: token.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(" -95 "), Some(-95));
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(&parse_int("42").unwrap().to_string()), Some(42));
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("n/a"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn test_parse_ip() {
        assert_eq!(parse_ip("::"), None);
        assert_eq!(parse_ip("10.0.0.5"), Some("10.0.0.5".to_string()));
        assert_eq!(
            parse_ip("2a02:8388:1:2::1"),
            Some("2a02:8388:1:2::1".to_string())
        );
        assert_eq!(parse_ip(""), Some(String::new()));
    }

    #[test]
    fn test_parse_used_data() {
        assert_eq!(
            parse_used_data("12.34MB"),
            Some(UsedData {
                value: 12.34,
                unit: "MB".to_string()
            })
        );
        assert_eq!(
            parse_used_data("0GB"),
            Some(UsedData {
                value: 0.0,
                unit: "GB".to_string()
            })
        );
        assert_eq!(
            parse_used_data("3.5 kb"),
            Some(UsedData {
                value: 3.5,
                unit: "KB".to_string()
            })
        );
        assert_eq!(
            parse_used_data("1.5PiB"),
            Some(UsedData {
                value: 1.5,
                unit: "PIB".to_string()
            })
        );
        assert_eq!(parse_used_data("nounit"), None);
        assert_eq!(parse_used_data("1234"), None);
        assert_eq!(parse_used_data(""), None);
    }

    #[test]
    fn test_parse_band_list() {
        assert_eq!(
            parse_band_list("CA Not Available", "bandDL-val").unwrap(),
            Vec::<i64>::new()
        );
        assert_eq!(
            parse_band_list(" CA Not Available ", "bandDL-val").unwrap(),
            Vec::<i64>::new()
        );
        assert_eq!(parse_band_list("B3+B7", "bandDL-val").unwrap(), vec![3, 7]);
        assert_eq!(parse_band_list("B20", "bandUL-val").unwrap(), vec![20]);
        assert_eq!(parse_band_list("1+B3", "bandUL-val").unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_parse_band_list_malformed() {
        let err = parse_band_list("B3+BX", "bandDL-val").unwrap_err();
        assert!(matches!(
            &err,
            ScrapeError::MalformedBandToken { context, token } if context == "bandDL-val" && token == "BX"
        ));
        assert!(parse_band_list("", "bandDL-val").is_err());
        assert!(parse_band_list("BB3", "bandDL-val").is_err());
    }
}
