//! The tool catalogue.
//!
//! List and by-id tools are generated for every resource kind; the search,
//! composite and digest tools are declared by hand.

use std::sync::Arc;

use comicvine_types::{
    Character, Envelope, Issue, Movie, Publisher, RecordShape, Resource, ResourceKind, SearchResult, Team, Volume,
};
use serde_json::{Map, Value};

use super::shape::{FieldSpec, MAX_LIMIT, MAX_OFFSET, ToolInputShape};

/// What a tool does once its arguments are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOperation {
    List(ResourceKind),
    ById(ResourceKind),
    Search,
    IssuesByCharacterName,
    IssuesForCharacter,
    CharactersForIssue,
    MoviesByCharacter,
    ComicsHtml,
}

/// A registered tool.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input: ToolInputShape,
    pub operation: ToolOperation,
    /// Schema of the structured result. `None` for text results.
    pub output_schema: Option<Arc<Map<String, Value>>>,
}

impl ToolDefinition {
    fn new(name: impl Into<String>, title: impl Into<String>, description: impl Into<String>, operation: ToolOperation) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            input: ToolInputShape::new(),
            operation,
            output_schema: None,
        }
    }

    fn input(mut self, input: ToolInputShape) -> Self {
        self.input = input;
        self
    }

    fn output<T: schemars::JsonSchema>(mut self) -> Self {
        self.output_schema = object_schema::<T>().map(Arc::new);
        self
    }
}

/// Every tool in catalogue order.
pub fn builtin_tools() -> Vec<ToolDefinition> {
    let mut tools: Vec<ToolDefinition> = ResourceKind::ALL.iter().map(|kind| list_tool(*kind)).collect();
    tools.extend(ResourceKind::ALL.iter().map(|kind| by_id_tool(*kind)));
    tools.extend([
        search_tool(),
        ToolDefinition::new(
            "get_issues_by_character_name",
            "Issues by character name",
            "Find comic issues featuring a character, searched by the character's name. One search call restricted to issues.",
            ToolOperation::IssuesByCharacterName,
        )
        .input(name_input("Character name, e.g. `Superman`."))
        .output::<Envelope<Vec<Issue>>>(),
        ToolDefinition::new(
            "get_issues_for_character",
            "Issues for a character",
            "Find comic issues featuring the character with the given id. Resolves the character's name first, then searches issues by it. Returns an empty result when the character does not exist.",
            ToolOperation::IssuesForCharacter,
        )
        .input(
            ToolInputShape::new()
                .field(FieldSpec::integer("characterId", "Comic Vine character id, e.g. 1443.").required())
                .paging(),
        )
        .output::<Envelope<Vec<Issue>>>(),
        ToolDefinition::new(
            "get_characters_for_issue",
            "Characters in an issue",
            "Find the characters credited in the issue with the given id. Resolves the issue's character credits first, then searches characters by their names.",
            ToolOperation::CharactersForIssue,
        )
        .input(
            ToolInputShape::new()
                .field(FieldSpec::integer("issueId", "Comic Vine issue id.").required())
                .paging(),
        )
        .output::<Envelope<Vec<Character>>>(),
        ToolDefinition::new(
            "get_movies_by_character",
            "Movies featuring a character",
            "Find movies featuring a character. Searches for the character by name, then searches movies by the titles listed on the first match.",
            ToolOperation::MoviesByCharacter,
        )
        .input(name_input("Character name, e.g. `Batman`."))
        .output::<Envelope<Vec<Movie>>>(),
        digest_tool(),
    ]);
    tools
}

fn list_tool(kind: ResourceKind) -> ToolDefinition {
    let plural = kind.collection_name().replace('_', " ");
    let definition = ToolDefinition::new(
        kind.list_tool(),
        format!("List {plural}"),
        format!(
            "List {plural} from Comic Vine. Supports `filter` (e.g. `name:Batman`), `sort` (e.g. `date_added:desc`), paging and a `field_list` to trim the payload."
        ),
        ToolOperation::List(kind),
    )
    .input(
        ToolInputShape::new()
            .paging()
            .field(FieldSpec::string("sort", "Sort expression `field:asc` or `field:desc`."))
            .field(FieldSpec::string("filter", "Filter expression `field:value`, comma separated for several fields.")),
    );
    with_record_output(definition, kind, true)
}

fn by_id_tool(kind: ResourceKind) -> ToolDefinition {
    let label = kind.label();
    let definition = ToolDefinition::new(
        kind.by_id_tool(),
        format!("Get {label} by id"),
        format!("Fetch one {label} by its Comic Vine id."),
        ToolOperation::ById(kind),
    )
    .input(
        ToolInputShape::new()
            .field(FieldSpec::integer(kind.id_argument(), "Comic Vine id of the record.").required())
            .field(FieldSpec::string("field_list", "Comma separated list of fields to return.")),
    );
    with_record_output(definition, kind, false)
}

fn with_record_output(definition: ToolDefinition, kind: ResourceKind, list: bool) -> ToolDefinition {
    fn typed<R: RecordShape>(definition: ToolDefinition, list: bool) -> ToolDefinition {
        if list {
            definition.output::<Envelope<Vec<R>>>()
        } else {
            definition.output::<Envelope<R>>()
        }
    }

    match kind {
        ResourceKind::Character => typed::<Character>(definition, list),
        ResourceKind::Issue => typed::<Issue>(definition, list),
        ResourceKind::Movie => typed::<Movie>(definition, list),
        ResourceKind::Publisher => typed::<Publisher>(definition, list),
        ResourceKind::Team => typed::<Team>(definition, list),
        ResourceKind::Volume => typed::<Volume>(definition, list),
        _ => typed::<Resource>(definition, list),
    }
}

fn search_tool() -> ToolDefinition {
    ToolDefinition::new(
        "search",
        "Search",
        "Search across Comic Vine resources. Pass several comma separated names in `resources` to widen the search, e.g. `character,issue` for comics about a character or `character,team` for team members.",
        ToolOperation::Search,
    )
    .input(
        ToolInputShape::new()
            .field(FieldSpec::string("query", "Search terms.").required())
            .field(FieldSpec::string(
                "resources",
                "Comma separated resource names: character, concept, origin, object, location, issue, story_arc, volume, publisher, person, team, video.",
            ))
            .paging(),
    )
    .output::<Envelope<Vec<SearchResult>>>()
}

fn digest_tool() -> ToolDefinition {
    ToolDefinition::new(
        "generate_comics_html",
        "Comics HTML page",
        "Render issues as a standalone HTML page with covers, titles, issue numbers, cover dates and short descriptions. Returns the HTML followed by a JSON summary.",
        ToolOperation::ComicsHtml,
    )
    .input(
        ToolInputShape::new()
            .field(FieldSpec::string("title", "Page title. Defaults to `DC Comics Issues`."))
            .field(FieldSpec::string("name", "Only issues with this name."))
            .field(FieldSpec::integer("issueNumber", "Only issues with this number."))
            .field(FieldSpec::string("orderBy", "Sort expression, e.g. `cover_date:desc`."))
            .field(FieldSpec::string("field_list", "Comma separated list of fields to fetch."))
            .field(FieldSpec::integer("limit", "Number of issues to render (1-100). Defaults to 20.").range(Some(1), Some(MAX_LIMIT)))
            .field(FieldSpec::integer("offset", "Number of issues to skip.").range(Some(0), Some(MAX_OFFSET))),
    )
}

fn name_input(description: &'static str) -> ToolInputShape {
    ToolInputShape::new()
        .field(FieldSpec::string("filter", description).required())
        .paging()
}

fn object_schema<T: schemars::JsonSchema>() -> Option<Map<String, Value>> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(schema)) => Some(schema),
        _ => None,
    }
}
