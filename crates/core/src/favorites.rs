//! Favorite payload validation and metadata normalization.
//!
//! Favorites for every category share one shape (`item_id`, `title`,
//! optional `image`) plus a JSON `metadata` object whose accepted keys depend
//! on the category:
//!
//! | Category | Keys                                   | Rules                              |
//! |----------|----------------------------------------|------------------------------------|
//! | anime    | `rating`                               | free-form string, numbers stringified |
//! | game     | `rating`                               | number, rounded, must be 1..=10    |
//! | music    | `audio_url` (required), `artist_name`  | non-blank url, artist defaults to `""` |
//!
//! Games additionally require `image`, when present, to be an http(s) image
//! url. Unknown metadata keys are dropped.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::category::Category;
use crate::error::CoreError;
use crate::validation::require_non_blank;

/// Lowest rating accepted for a favorite game.
pub const MIN_GAME_RATING: i64 = 1;

/// Highest rating accepted for a favorite game.
pub const MAX_GAME_RATING: i64 = 10;

static IMAGE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://.*\.(jpe?g|png|gif|bmp|webp)$").expect("valid regex")
});

/// Validate a favorite for `category` and return its normalized metadata.
pub fn normalize_favorite(
    category: Category,
    item_id: &str,
    title: &str,
    image: Option<&str>,
    metadata: &Value,
) -> Result<Value, CoreError> {
    require_non_blank("item_id", item_id)?;
    require_non_blank("title", title)?;

    let input = match metadata {
        Value::Null => Map::new(),
        Value::Object(map) => map.clone(),
        _ => {
            return Err(CoreError::Validation(
                "metadata must be a JSON object".into(),
            ))
        }
    };

    let mut out = Map::new();
    match category {
        Category::Anime => {
            if let Some(rating) = anime_rating(input.get("rating"))? {
                out.insert("rating".into(), Value::String(rating));
            }
        }
        Category::Game => {
            if let Some(url) = image {
                if !IMAGE_URL_RE.is_match(url) {
                    return Err(CoreError::Validation(format!(
                        "{url} is not a valid image URL"
                    )));
                }
            }
            if let Some(rating) = game_rating(input.get("rating"))? {
                out.insert("rating".into(), Value::from(rating));
            }
        }
        Category::Music => {
            let audio_url = match input.get("audio_url") {
                Some(Value::String(url)) if !url.trim().is_empty() => url.clone(),
                _ => return Err(CoreError::Validation("audio_url is required".into())),
            };
            let artist_name = match input.get("artist_name") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(name)) => name.clone(),
                Some(_) => {
                    return Err(CoreError::Validation(
                        "artist_name must be a string".into(),
                    ))
                }
            };
            out.insert("audio_url".into(), Value::String(audio_url));
            out.insert("artist_name".into(), Value::String(artist_name));
        }
    }

    Ok(Value::Object(out))
}

fn anime_rating(value: Option<&Value>) -> Result<Option<String>, CoreError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(CoreError::Validation(
            "rating must be a string or a number".into(),
        )),
    }
}

fn game_rating(value: Option<&Value>) -> Result<Option<i64>, CoreError> {
    let raw = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| CoreError::Validation("rating must be a number".into()))?,
        Some(_) => return Err(CoreError::Validation("rating must be a number".into())),
    };

    let rounded = raw.round() as i64;
    if !(MIN_GAME_RATING..=MAX_GAME_RATING).contains(&rounded) {
        return Err(CoreError::Validation(format!(
            "rating must be between {MIN_GAME_RATING} and {MAX_GAME_RATING}"
        )));
    }
    Ok(Some(rounded))
}
