//! REST client for the therapist service.
//!
//! Fetches the published hourly rate and the weekly availability windows.
//! The therapist service serializes weekdays as upper-case names and times
//! as `HH:MM` (some rows carry seconds).

use async_trait::async_trait;
use chrono::{NaiveTime, Weekday};
use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode, TherapistId};
use crate::domain::scheduling::AvailabilityWindow;
use crate::ports::TherapistDirectory;

/// Therapist service adapter over HTTP.
pub struct RestTherapistDirectory {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TherapistResponse {
    #[serde(default)]
    hourly_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WindowResponse {
    weekday: String,
    start_time: String,
    end_time: String,
}

fn parse_weekday(raw: &str) -> Result<Weekday, DomainError> {
    match raw.to_ascii_uppercase().as_str() {
        "MONDAY" => Ok(Weekday::Mon),
        "TUESDAY" => Ok(Weekday::Tue),
        "WEDNESDAY" => Ok(Weekday::Wed),
        "THURSDAY" => Ok(Weekday::Thu),
        "FRIDAY" => Ok(Weekday::Fri),
        "SATURDAY" => Ok(Weekday::Sat),
        "SUNDAY" => Ok(Weekday::Sun),
        other => Err(DomainError::new(
            ErrorCode::UpstreamFailure,
            format!("Unrecognized weekday from therapist service: {}", other),
        )),
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| {
            DomainError::new(
                ErrorCode::UpstreamFailure,
                format!("Unrecognized time from therapist service: {} ({})", raw, e),
            )
        })
}

impl WindowResponse {
    fn into_window(self) -> Result<AvailabilityWindow, DomainError> {
        let weekday = parse_weekday(&self.weekday)?;
        let start = parse_time(&self.start_time)?;
        let end = parse_time(&self.end_time)?;
        AvailabilityWindow::new(weekday, start, end).map_err(DomainError::from)
    }
}

impl RestTherapistDirectory {
    /// Create a new client against the therapist service base URL.
    pub fn new(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    async fn get(&self, url: &str) -> Result<Option<reqwest::Response>, DomainError> {
        let response = self.http_client.get(url).send().await.map_err(|e| {
            DomainError::new(
                ErrorCode::UpstreamFailure,
                format!("Therapist service unreachable: {}", e),
            )
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Therapist service lookup failed");
            return Err(DomainError::new(
                ErrorCode::UpstreamFailure,
                format!("Therapist service error: {}", error_text),
            ));
        }

        Ok(Some(response))
    }
}

#[async_trait]
impl TherapistDirectory for RestTherapistDirectory {
    async fn hourly_rate(&self, therapist: &TherapistId) -> Result<Option<f64>, DomainError> {
        let url = format!("{}/api/therapists/{}", self.base_url, therapist);
        let Some(response) = self.get(&url).await? else {
            return Ok(None);
        };

        let therapist: TherapistResponse = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::UpstreamFailure,
                format!("Invalid therapist response: {}", e),
            )
        })?;

        Ok(therapist.hourly_rate)
    }

    async fn availability_windows(
        &self,
        therapist: &TherapistId,
    ) -> Result<Vec<AvailabilityWindow>, DomainError> {
        let url = format!("{}/api/therapists/{}/availability", self.base_url, therapist);
        let Some(response) = self.get(&url).await? else {
            return Ok(Vec::new());
        };

        let rows: Vec<WindowResponse> = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::UpstreamFailure,
                format!("Invalid availability response: {}", e),
            )
        })?;

        rows.into_iter().map(WindowResponse::into_window).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upper_and_lower_case_weekdays() {
        assert_eq!(parse_weekday("MONDAY").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("sunday").unwrap(), Weekday::Sun);
        assert!(parse_weekday("FUNDAY").is_err());
    }

    #[test]
    fn parses_times_with_and_without_seconds() {
        assert_eq!(
            parse_time("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("17:30:00").unwrap(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );
        assert!(parse_time("9h00").is_err());
    }

    #[test]
    fn window_row_converts_to_domain_window() {
        let row = WindowResponse {
            weekday: "WEDNESDAY".to_string(),
            start_time: "09:00".to_string(),
            end_time: "12:00".to_string(),
        };
        let window = row.into_window().unwrap();
        assert_eq!(window.weekday(), Weekday::Wed);
    }

    #[test]
    fn inverted_window_row_is_rejected() {
        let row = WindowResponse {
            weekday: "WEDNESDAY".to_string(),
            start_time: "12:00".to_string(),
            end_time: "09:00".to_string(),
        };
        assert!(row.into_window().is_err());
    }
}
