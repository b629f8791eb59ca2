//! Resource kinds of the Comic Vine catalogue.
//!
//! Every kind owns a fixed numeric type prefix used by the upstream detail
//! endpoints (`/character/4005-1443/`), an optional default field list, and
//! the names under which the tool surface exposes it.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the fixed upstream entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceKind {
    Issue,
    Character,
    Publisher,
    Concept,
    Location,
    Movie,
    Origin,
    Power,
    Creator,
    StoryArc,
    Volume,
    Item,
    Team,
}

impl ResourceKind {
    /// All kinds, in the order the tool catalogue lists them.
    pub const ALL: [ResourceKind; 13] = [
        ResourceKind::Character,
        ResourceKind::Issue,
        ResourceKind::Movie,
        ResourceKind::Publisher,
        ResourceKind::Team,
        ResourceKind::Volume,
        ResourceKind::Concept,
        ResourceKind::Location,
        ResourceKind::StoryArc,
        ResourceKind::Item,
        ResourceKind::Creator,
        ResourceKind::Origin,
        ResourceKind::Power,
    ];

    /// Numeric type prefix. Part of the upstream wire contract.
    pub const fn prefix(self) -> u32 {
        match self {
            ResourceKind::Issue => 4000,
            ResourceKind::Character => 4005,
            ResourceKind::Publisher => 4010,
            ResourceKind::Concept => 4015,
            ResourceKind::Location => 4020,
            ResourceKind::Movie => 4025,
            ResourceKind::Origin => 4030,
            ResourceKind::Power => 4035,
            ResourceKind::Creator => 4040,
            ResourceKind::StoryArc => 4045,
            ResourceKind::Volume => 4050,
            ResourceKind::Item => 4055,
            ResourceKind::Team => 4060,
        }
    }

    /// Formats the composite `{prefix}-{id}` identifier.
    ///
    /// The numeric part is not range checked; the upstream rejects ids it
    /// does not know.
    ///
    /// ```
    /// use comicvine_types::ResourceKind;
    /// assert_eq!(ResourceKind::Character.encode_id(1443), "4005-1443");
    /// ```
    pub fn encode_id(self, id: i64) -> String {
        format!("{}-{}", self.prefix(), id)
    }

    /// Field list requested when the caller does not name one.
    ///
    /// The issue list carries `character_credits` and the character list
    /// carries `movies` because composite lookups read those sub-fields.
    pub const fn default_field_list(self) -> Option<&'static str> {
        match self {
            ResourceKind::Character => Some(
                "id,name,real_name,aliases,deck,image,publisher,first_appeared_in_issue,count_of_issue_appearances,movies,api_detail_url,site_detail_url",
            ),
            ResourceKind::Issue => Some(
                "id,name,issue_number,volume,cover_date,store_date,deck,description,image,character_credits,api_detail_url,site_detail_url",
            ),
            ResourceKind::Movie => Some(
                "id,name,deck,release_date,rating,runtime,budget,box_office_revenue,total_revenue,studios,image,api_detail_url,site_detail_url",
            ),
            ResourceKind::Publisher => {
                Some("id,name,aliases,deck,location_city,location_state,image,api_detail_url,site_detail_url")
            }
            ResourceKind::Team => Some(
                "id,name,aliases,deck,count_of_team_members,publisher,first_appeared_in_issue,image,api_detail_url,site_detail_url",
            ),
            ResourceKind::Volume => Some(
                "id,name,start_year,count_of_issues,publisher,first_issue,last_issue,deck,image,api_detail_url,site_detail_url",
            ),
            ResourceKind::StoryArc => {
                Some("id,name,deck,publisher,first_appeared_in_issue,image,api_detail_url,site_detail_url")
            }
            ResourceKind::Concept
            | ResourceKind::Location
            | ResourceKind::Item
            | ResourceKind::Creator
            | ResourceKind::Origin
            | ResourceKind::Power => None,
        }
    }

    /// Singular upstream resource name, also used as the `resources` token
    /// of the search endpoint.
    pub const fn resource_name(self) -> &'static str {
        match self {
            ResourceKind::Issue => "issue",
            ResourceKind::Character => "character",
            ResourceKind::Publisher => "publisher",
            ResourceKind::Concept => "concept",
            ResourceKind::Location => "location",
            ResourceKind::Movie => "movie",
            ResourceKind::Origin => "origin",
            ResourceKind::Power => "power",
            ResourceKind::Creator => "person",
            ResourceKind::StoryArc => "story_arc",
            ResourceKind::Volume => "volume",
            ResourceKind::Item => "object",
            ResourceKind::Team => "team",
        }
    }

    /// Plural upstream resource name.
    pub const fn collection_name(self) -> &'static str {
        match self {
            ResourceKind::Issue => "issues",
            ResourceKind::Character => "characters",
            ResourceKind::Publisher => "publishers",
            ResourceKind::Concept => "concepts",
            ResourceKind::Location => "locations",
            ResourceKind::Movie => "movies",
            ResourceKind::Origin => "origins",
            ResourceKind::Power => "powers",
            ResourceKind::Creator => "people",
            ResourceKind::StoryArc => "story_arcs",
            ResourceKind::Volume => "volumes",
            ResourceKind::Item => "objects",
            ResourceKind::Team => "teams",
        }
    }

    /// Collection endpoint, e.g. `/characters`.
    pub fn collection_path(self) -> String {
        format!("/{}", self.collection_name())
    }

    /// Detail endpoint for one record, e.g. `/character/4005-1443/`.
    pub fn detail_path(self, id: i64) -> String {
        format!("/{}/{}/", self.resource_name(), self.encode_id(id))
    }

    /// Name of the tool listing this kind.
    pub fn list_tool(self) -> String {
        format!("get_{}", self.collection_name())
    }

    /// Name of the tool fetching one record of this kind.
    pub fn by_id_tool(self) -> String {
        format!("get_{}_by_id", self.resource_name())
    }

    /// Argument carrying the numeric id in the by-ID tool.
    pub const fn id_argument(self) -> &'static str {
        match self {
            ResourceKind::Issue => "issueId",
            ResourceKind::Character => "characterId",
            ResourceKind::Publisher => "publisherId",
            ResourceKind::Concept => "conceptId",
            ResourceKind::Location => "locationId",
            ResourceKind::Movie => "movieId",
            ResourceKind::Origin => "originId",
            ResourceKind::Power => "powerId",
            ResourceKind::Creator => "personId",
            ResourceKind::StoryArc => "storyArcId",
            ResourceKind::Volume => "volumeId",
            ResourceKind::Item => "objectId",
            ResourceKind::Team => "teamId",
        }
    }

    /// Human readable label, e.g. `story arc`.
    pub const fn label(self) -> &'static str {
        match self {
            ResourceKind::StoryArc => "story arc",
            other => other.resource_name(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
