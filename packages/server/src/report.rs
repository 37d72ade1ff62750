//! Report-form validation, multipart reading and photo storage.

use std::path::Path;

use actix_multipart::Multipart;
use chrono::{DateTime, NaiveDate, NaiveTime, Timelike as _, Utc};
use chrono_tz::Europe::London;
use futures::StreamExt as _;
use ticksight_database_models::NewUserSighting;
use ticksight_server_models::{ReportErrors, ReportField, ReportFields};
use ticksight_sighting_models::UkCity;

/// Web path prefix uploaded photos are served under.
pub const UPLOAD_WEB_PREFIX: &str = "images/uploads";

/// Largest accepted photo.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Largest accepted text field.
pub const MAX_TEXT_BYTES: usize = 64 * 1024;

/// Date left empty.
pub const MSG_DATE_REQUIRED: &str = "Please select a date for the sighting.";
/// Time left empty.
pub const MSG_TIME_REQUIRED: &str = "Please select a time for the sighting.";
/// Location left empty.
pub const MSG_LOCATION_REQUIRED: &str = "Please enter a location (town/area or postcode).";
/// Species left empty.
pub const MSG_SPECIES_REQUIRED: &str = "Please select a tick species.";
/// Date present but not `YYYY-MM-DD`.
pub const MSG_DATE_INVALID: &str = "Please enter a valid date.";
/// Time present but not `HH:MM` or `HH:MM:SS`.
pub const MSG_TIME_INVALID: &str = "Please enter a valid time.";
/// Set on both date and time when their combination is later than now.
pub const MSG_FUTURE: &str = "The sighting date/time cannot be in the future.";
/// Location not on the city allow-list.
pub const MSG_CITY_UNKNOWN: &str = "Please enter a valid UK city from the supported list.";
/// The photo could not be written to the upload directory.
pub const MSG_UPLOAD_FAILED: &str = "Failed to upload image. Please try again.";
/// The photo part was malformed or over [`MAX_IMAGE_BYTES`].
pub const MSG_UPLOAD_BROKEN: &str = "There was a problem with the image upload.";
/// A text field exceeded [`MAX_TEXT_BYTES`].
pub const MSG_TOO_LONG: &str = "This entry is too long. Please shorten it.";
/// The multipart body broke outside the photo part.
pub const MSG_FORM_BROKEN: &str = "There was a problem reading the form. Please try again.";
/// Storing the sighting failed.
pub const MSG_SAVE_FAILED: &str = "There was a problem saving your sighting. Please try again.";

/// Errors from reading or storing an uploaded photo.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The multipart stream was malformed.
    #[error("Multipart error: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    /// The photo exceeded [`MAX_IMAGE_BYTES`].
    #[error("Upload exceeds {limit} bytes")]
    TooLarge {
        /// The byte limit that was exceeded.
        limit: usize,
    },
}

/// A photo received with a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// File name as sent by the browser.
    pub original_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// A parsed report submission.
#[derive(Debug, Default)]
pub struct ReportSubmission {
    /// Text fields, trimmed.
    pub fields: ReportFields,
    /// The photo, when one was chosen.
    pub image: Option<UploadedImage>,
    /// Set when the photo part was malformed or too large.
    pub upload_error: Option<UploadError>,
    /// Set when the stream broke outside the photo part. Parts after the
    /// break are not read.
    pub form_error: Option<actix_multipart::MultipartError>,
    /// Text fields dropped for exceeding [`MAX_TEXT_BYTES`], by field.
    /// Names that are not report fields map to [`ReportField::General`].
    pub too_long: Vec<ReportField>,
}

/// The result of validating [`ReportFields`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportValidation {
    /// Messages by field; empty when the report is valid.
    pub errors: ReportErrors,
    /// The allow-listed city, when the location matched one.
    pub city: Option<UkCity>,
}

impl ReportValidation {
    /// Whether no field carries a message.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates the text fields of a report against `now`.
///
/// Missing fields get a "required" message. When both date and time are
/// given they must parse (`YYYY-MM-DD`, `HH:MM` or `HH:MM:SS`) and their
/// combination, read as UK local time and taken to the minute, must not be
/// after `now`. The location must name an allow-listed city, ignoring case.
#[must_use]
pub fn validate_report(fields: &ReportFields, now: DateTime<Utc>) -> ReportValidation {
    let mut errors = ReportErrors::new();

    if fields.date.is_empty() {
        errors.insert(ReportField::Date, MSG_DATE_REQUIRED.to_string());
    }
    if fields.time.is_empty() {
        errors.insert(ReportField::Time, MSG_TIME_REQUIRED.to_string());
    }
    if fields.location.is_empty() {
        errors.insert(ReportField::Location, MSG_LOCATION_REQUIRED.to_string());
    }
    if fields.species.is_empty() {
        errors.insert(ReportField::Species, MSG_SPECIES_REQUIRED.to_string());
    }

    if !fields.date.is_empty() && !fields.time.is_empty() {
        let date = parse_form_date(&fields.date);
        let time = parse_form_time(&fields.time);

        if date.is_none() {
            errors.insert(ReportField::Date, MSG_DATE_INVALID.to_string());
        }
        if time.is_none() {
            errors.insert(ReportField::Time, MSG_TIME_INVALID.to_string());
        }

        if let (Some(date), Some(time)) = (date, time) {
            let minute = time.with_second(0).unwrap_or(time);
            if date.and_time(minute) > now.with_timezone(&London).naive_local() {
                errors.insert(ReportField::Date, MSG_FUTURE.to_string());
                errors.insert(ReportField::Time, MSG_FUTURE.to_string());
            }
        }
    }

    let city = if fields.location.is_empty() {
        None
    } else {
        let city = UkCity::lookup(&fields.location);
        if city.is_none() {
            errors.insert(ReportField::Location, MSG_CITY_UNKNOWN.to_string());
        }
        city
    };

    ReportValidation { errors, city }
}

/// Parses a strict `YYYY-MM-DD` date. Values chrono would accept but that
/// don't print back identically (e.g. `2024-3-1`) are rejected.
fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .filter(|d| d.format("%Y-%m-%d").to_string() == raw)
}

fn parse_form_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

/// Builds the row to store from validated fields.
#[must_use]
pub fn new_sighting(
    fields: &ReportFields,
    city: Option<UkCity>,
    image_path: Option<String>,
) -> NewUserSighting {
    NewUserSighting {
        date: fields.date.clone(),
        time: fields.time.clone(),
        location: city.map_or_else(|| fields.location.clone(), |c| c.to_string()),
        species: fields.species.clone(),
        description: Some(fields.description.clone()).filter(|d| !d.is_empty()),
        image_path,
    }
}

/// Reads every part of a report form.
///
/// Text parts fill [`ReportFields`]; one longer than [`MAX_TEXT_BYTES`] is
/// dropped and listed in [`ReportSubmission::too_long`]. The `image` part
/// is buffered when it carries a non-empty file name, and problems with it
/// land in [`ReportSubmission::upload_error`]. Reading stops at the first
/// broken part.
pub async fn read_submission(mut payload: Multipart) -> ReportSubmission {
    let mut submission = ReportSubmission::default();

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                submission.form_error = Some(e);
                break;
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let is_image = name == "image";

        let limit = if is_image { MAX_IMAGE_BYTES } else { MAX_TEXT_BYTES };
        let body = match read_part(&mut field, limit).await {
            Ok(body) => body,
            Err(e) if is_image => {
                submission.upload_error = Some(e.into());
                break;
            }
            Err(e) => {
                submission.form_error = Some(e);
                break;
            }
        };

        if is_image {
            if body.overflowed {
                submission.upload_error = Some(UploadError::TooLarge { limit });
            } else if let Some(original_name) = file_name.filter(|n| !n.is_empty()) {
                submission.image = Some(UploadedImage {
                    original_name,
                    bytes: body.bytes,
                });
            }
        } else if body.overflowed {
            log::debug!("Dropping form field '{name}' over {limit} bytes");
            submission
                .too_long
                .push(name.parse().unwrap_or(ReportField::General));
        } else {
            submission
                .fields
                .set(&name, &String::from_utf8_lossy(&body.bytes));
        }
    }

    submission
}

/// One multipart part, cut off at a byte limit.
struct PartBody {
    bytes: Vec<u8>,
    overflowed: bool,
}

/// Reads a part to its end so later parts stay readable, keeping at most
/// `limit` bytes.
async fn read_part(
    field: &mut actix_multipart::Field,
    limit: usize,
) -> Result<PartBody, actix_multipart::MultipartError> {
    let mut body = PartBody {
        bytes: Vec::new(),
        overflowed: false,
    };
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if body.overflowed || body.bytes.len() + chunk.len() > limit {
            body.overflowed = true;
            continue;
        }
        body.bytes.extend_from_slice(&chunk);
    }
    if body.overflowed {
        body.bytes.clear();
    }
    Ok(body)
}

/// Reduces the extension of `original_name` to ASCII alphanumerics and
/// returns it with a leading dot, or an empty string when nothing is left.
#[must_use]
pub fn sanitized_extension(original_name: &str) -> String {
    let ext: String = Path::new(original_name)
        .extension()
        .map(|e| e.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if ext.is_empty() {
        String::new()
    } else {
        format!(".{ext}")
    }
}

/// Returns the stored file name for a photo: `sighting_{ts}_{hex}{.ext}`.
#[must_use]
pub fn upload_file_name(original_name: &str, unix_ts: i64, suffix: &str) -> String {
    format!(
        "sighting_{unix_ts}_{suffix}{}",
        sanitized_extension(original_name)
    )
}

/// Writes `image` into `dir` under a fresh name and returns its web path,
/// `images/uploads/{file}`.
///
/// # Errors
///
/// Returns [`UploadError::Io`] if the directory cannot be created or the
/// file cannot be written.
pub async fn save_upload(dir: &Path, image: &UploadedImage) -> Result<String, UploadError> {
    tokio::fs::create_dir_all(dir).await?;

    let suffix: String = uuid::Uuid::new_v4().simple().to_string().chars().take(8).collect();
    let file_name = upload_file_name(&image.original_name, Utc::now().timestamp(), &suffix);

    tokio::fs::write(dir.join(&file_name), &image.bytes).await?;
    log::info!("Saved uploaded photo {file_name} ({} bytes)", image.bytes.len());

    Ok(format!("{UPLOAD_WEB_PREFIX}/{file_name}"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 30, 45).unwrap()
    }

    fn fields(date: &str, time: &str, location: &str, species: &str) -> ReportFields {
        ReportFields {
            date: date.to_string(),
            time: time.to_string(),
            location: location.to_string(),
            species: species.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn valid_report_normalises_city() {
        let result = validate_report(&fields("2025-06-01", "09:15", "lEEds", "Marsh tick"), now());
        assert!(result.is_valid(), "{:?}", result.errors);
        assert_eq!(result.city, Some(UkCity::Leeds));

        let row = new_sighting(
            &fields("2025-06-01", "09:15", "lEEds", "Marsh tick"),
            result.city,
            None,
        );
        assert_eq!(row.location, "Leeds");
        assert!(row.description.is_none());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let result = validate_report(&ReportFields::default(), now());
        assert_eq!(result.errors.len(), 4);
        assert_eq!(result.errors[&ReportField::Date], MSG_DATE_REQUIRED);
        assert_eq!(result.errors[&ReportField::Time], MSG_TIME_REQUIRED);
        assert_eq!(result.errors[&ReportField::Location], MSG_LOCATION_REQUIRED);
        assert_eq!(result.errors[&ReportField::Species], MSG_SPECIES_REQUIRED);
    }

    #[test]
    fn malformed_date_and_time() {
        let result = validate_report(&fields("2025-6-1", "25:99", "Leeds", "Marsh tick"), now());
        assert_eq!(result.errors[&ReportField::Date], MSG_DATE_INVALID);
        assert_eq!(result.errors[&ReportField::Time], MSG_TIME_INVALID);

        let result = validate_report(&fields("2025-02-30", "10:00", "Leeds", "Marsh tick"), now());
        assert_eq!(result.errors[&ReportField::Date], MSG_DATE_INVALID);
        assert!(!result.errors.contains_key(&ReportField::Time));
    }

    #[test]
    fn accepts_seconds_in_time() {
        let result = validate_report(&fields("2025-06-01", "09:15:30", "York", "x"), now());
        assert!(!result.errors.contains_key(&ReportField::Time));
        assert_eq!(result.errors[&ReportField::Location], MSG_CITY_UNKNOWN);
    }

    #[test]
    fn future_sighting_flags_date_and_time() {
        // 12:30:45 UTC is 13:30:45 in London during summer time.
        let result = validate_report(&fields("2025-06-15", "13:31", "Leeds", "Marsh tick"), now());
        assert_eq!(result.errors[&ReportField::Date], MSG_FUTURE);
        assert_eq!(result.errors[&ReportField::Time], MSG_FUTURE);

        let same_minute =
            validate_report(&fields("2025-06-15", "13:30:59", "Leeds", "Marsh tick"), now());
        assert!(same_minute.is_valid(), "{:?}", same_minute.errors);
    }

    #[test]
    fn summer_time_sighting_from_last_hour_is_accepted() {
        let result = validate_report(&fields("2025-06-15", "13:10", "Leeds", "Marsh tick"), now());
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn winter_time_matches_utc() {
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
        let past = validate_report(&fields("2025-01-10", "09:00", "Leeds", "Marsh tick"), now);
        assert!(past.is_valid(), "{:?}", past.errors);

        let future = validate_report(&fields("2025-01-10", "09:01", "Leeds", "Marsh tick"), now);
        assert_eq!(future.errors[&ReportField::Time], MSG_FUTURE);
    }

    #[test]
    fn date_checks_need_both_fields() {
        let result = validate_report(&fields("not-a-date", "", "Leeds", "Marsh tick"), now());
        assert_eq!(result.errors[&ReportField::Time], MSG_TIME_REQUIRED);
        assert!(!result.errors.contains_key(&ReportField::Date));
    }

    #[test]
    fn extension_is_sanitized() {
        assert_eq!(sanitized_extension("photo.JPG"), ".JPG");
        assert_eq!(sanitized_extension("tick.p-n g"), ".png");
        assert_eq!(sanitized_extension("no_extension"), "");
        assert_eq!(sanitized_extension("weird.$$$"), "");
        assert_eq!(
            upload_file_name("a.jpeg", 1_700_000_000, "deadbeef"),
            "sighting_1700000000_deadbeef.jpeg"
        );
    }

    #[tokio::test]
    async fn saves_upload_under_web_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let image = UploadedImage {
            original_name: "tick.png".to_string(),
            bytes: vec![1, 2, 3],
        };

        let web_path = save_upload(&dir.path().join("uploads"), &image).await.unwrap();
        assert!(web_path.starts_with("images/uploads/sighting_"));
        assert!(web_path.ends_with(".png"));

        let file_name = web_path.rsplit('/').next().unwrap();
        let stored = std::fs::read(dir.path().join("uploads").join(file_name)).unwrap();
        assert_eq!(stored, vec![1, 2, 3]);
    }
}
