//! Typed records mirroring the upstream resource payloads.
//!
//! The upstream omits or nulls fields freely, so almost everything is
//! optional. Only `id` is required: a record without one fails validation
//! instead of being given a made-up identifier. Fields the upstream sends
//! but a record does not declare are dropped, except on [`Resource`] and
//! [`SearchResult`] which carry them through verbatim.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A record type the response normalizer can validate and fill.
pub trait RecordShape: Serialize + DeserializeOwned + JsonSchema {
    /// Short noun used in validation messages, e.g. `character`.
    const SHAPE: &'static str;

    /// Fills placeholders for fields the upstream left out.
    fn fill_defaults(&mut self) {}
}

/// Deserializes `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Cover and portrait image URLs in the sizes the upstream renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_large_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiny_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tags: Option<String>,
}

impl Image {
    /// Largest available cover, preferring `super`, then `screen_large`,
    /// then `medium`.
    pub fn best_cover_url(&self) -> Option<&str> {
        [&self.super_url, &self.screen_large_url, &self.medium_url]
            .into_iter()
            .find_map(|url| url.as_deref().filter(|url| !url.is_empty()))
    }
}

/// A partial record embedded in another one, such as an entry of
/// `character_credits` or `movies`.
///
/// Composite lookups only ever read `name`; a `null` name becomes `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CrossReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
}

impl CrossReference {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Character {
    /// Unique ID of the character.
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    /// Aliases separated by newlines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
    /// Birth date, when one exists. Not an origin date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_enemies: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_friends: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_of_issue_appearances: Option<i64>,
    /// Real life people who created the character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creators: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appeared_in_issue: Option<CrossReference>,
    /// Numeric code or label, depending on the upstream revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues_died_in: Option<Vec<CrossReference>>,
    /// Movies the character appears in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<CrossReference>>,
    /// Human, alien, robot, ...; a plain label or a stub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub powers: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<CrossReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_arc_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_enemies: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_friends: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_credits: Option<Vec<CrossReference>>,
}

impl RecordShape for Character {
    const SHAPE: &'static str = "character";

    fn fill_defaults(&mut self) {
        self.name.get_or_insert_with(|| "Unknown Character".to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number within the volume. Not always numeric ("1/2", "Annual 1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<CrossReference>,
    /// Publish date printed on the cover.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_date: Option<String>,
    /// Date the issue was first sold in stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters_died_in: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disbanded_teams: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appearance_characters: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appearance_concepts: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appearance_locations: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appearance_objects: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appearance_storyarcs: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appearance_teams: Option<Vec<CrossReference>>,
    /// `false`, or a stub pointing at the review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_staff_review: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_arc_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams_disbanded_in: Option<Vec<CrossReference>>,
}

impl RecordShape for Issue {
    const SHAPE: &'static str = "issue";
}

impl Issue {
    /// Title shown for the issue: its own name, else its volume's name.
    pub fn display_title(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.volume.as_ref().map(|volume| volume.name.as_str()).filter(|name| !name.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Movie {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
    /// Box office takings; a number or a formatted string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_office_revenue: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concepts: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_staff_review: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producers: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Running time in minutes, as the upstream formats it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studios: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub things: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writers: Option<Vec<CrossReference>>,
}

impl RecordShape for Movie {
    const SHAPE: &'static str = "movie";

    fn fill_defaults(&mut self) {
        self.name.get_or_insert_with(|| "Unknown Movie".to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Volume {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// First year the volume appeared in comics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_of_issues: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<CrossReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_issue: Option<CrossReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_issue: Option<CrossReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_credits: Option<Vec<CrossReference>>,
}

impl RecordShape for Volume {
    const SHAPE: &'static str = "volume";

    fn fill_defaults(&mut self) {
        self.name.get_or_insert_with(|| "Unknown Volume".to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Publisher {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_arcs: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<CrossReference>>,
}

impl RecordShape for Publisher {
    const SHAPE: &'static str = "publisher";

    fn fill_defaults(&mut self) {
        self.name.get_or_insert_with(|| "Unknown Publisher".to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_enemies: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_friends: Option<Vec<CrossReference>>,
    /// Members of the team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_of_issue_appearances: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_of_team_members: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disbanded_in_issues: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_appeared_in_issue: Option<CrossReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues_disbanded_in: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<CrossReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_arc_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_credits: Option<Vec<CrossReference>>,
}

impl RecordShape for Team {
    const SHAPE: &'static str = "team";

    fn fill_defaults(&mut self) {
        self.name.get_or_insert_with(|| "Unknown Team".to_string());
    }
}

/// Any record without a dedicated type: concepts, locations, story arcs,
/// objects, people, origins and powers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Resource {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
    /// Remaining upstream fields, carried through unchanged.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RecordShape for Resource {
    const SHAPE: &'static str = "resource";
}

/// One hit of the multi-resource search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchResult {
    pub id: i64,
    /// Resource the hit maps to (`character`, `issue`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Always a string once normalized; `null` becomes `""`.
    #[serde(default, deserialize_with = "null_as_default")]
    #[schemars(with = "Option<String>")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_detail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_credits: Option<Vec<CrossReference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<CrossReference>>,
    /// Other fields requested through `field_list`.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl RecordShape for SearchResult {
    const SHAPE: &'static str = "search result";

    fn fill_defaults(&mut self) {
        self.resource_type.get_or_insert_with(|| "unknown".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_result_null_name_becomes_empty_string() {
        let mut result: SearchResult = serde_json::from_value(json!({ "id": 1, "name": null })).unwrap();
        result.fill_defaults();
        assert_eq!(result.name, "");
        assert_eq!(result.resource_type.as_deref(), Some("unknown"));
    }

    #[test]
    fn unknown_fields_are_dropped_from_typed_records() {
        let character: Character =
            serde_json::from_value(json!({ "id": 2, "name": "Batman", "resource_type": "character" })).unwrap();
        let value = serde_json::to_value(&character).unwrap();
        assert_eq!(value, json!({ "id": 2, "name": "Batman" }));
    }

    #[test]
    fn generic_resources_keep_their_extra_fields() {
        let resource: Resource =
            serde_json::from_value(json!({ "id": 3, "name": "Flight", "count_of_issue_appearances": 12 })).unwrap();
        assert_eq!(resource.attributes.get("count_of_issue_appearances"), Some(&json!(12)));
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["count_of_issue_appearances"], json!(12));
    }

    #[test]
    fn placeholder_names_fill_only_missing_values() {
        let mut movie: Movie = serde_json::from_value(json!({ "id": 4, "name": null })).unwrap();
        movie.fill_defaults();
        assert_eq!(movie.name.as_deref(), Some("Unknown Movie"));

        let mut team: Team = serde_json::from_value(json!({ "id": 5, "name": "Justice League" })).unwrap();
        team.fill_defaults();
        assert_eq!(team.name.as_deref(), Some("Justice League"));
    }

    #[test]
    fn cross_reference_accepts_null_names() {
        let stub: CrossReference = serde_json::from_value(json!({ "id": 9, "name": null })).unwrap();
        assert_eq!(stub.name, "");
    }

    #[test]
    fn best_cover_prefers_largest_image() {
        let image = Image {
            medium_url: Some("medium".into()),
            screen_large_url: Some("large".into()),
            ..Image::default()
        };
        assert_eq!(image.best_cover_url(), Some("large"));
        assert_eq!(Image::default().best_cover_url(), None);
    }

    #[test]
    fn issue_title_falls_back_to_volume_name() {
        let issue: Issue =
            serde_json::from_value(json!({ "id": 6, "name": null, "volume": { "id": 1, "name": "Detective Comics" } }))
                .unwrap();
        assert_eq!(issue.display_title(), Some("Detective Comics"));
    }
}
