pub mod duration {
    use crate::time::parse_duration;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse_duration(&value).map_err(|err| D::Error::custom(err.to_string()))
    }
}

#[cfg(test)]
mod test {
    use serde_derive::Deserialize;
    use std::time::Duration;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(with = "super::duration")]
        wait: Duration,
    }

    #[test]
    fn test_duration_from_string() {
        let holder: Holder = serde_json::from_str(r#"{"wait": "1500ms"}"#).unwrap();
        assert_eq!(holder.wait, Duration::from_millis(1500));
    }

    #[test]
    fn test_bad_duration_is_reported() {
        let result = serde_json::from_str::<Holder>(r#"{"wait": "later"}"#);
        assert!(result.unwrap_err().to_string().contains("later"));
    }
}
