//! Tool registry: declared input shapes plus dispatch into the engine.

mod catalog;
mod shape;

use std::time::Instant;

use comicvine_api::ComicVineApi;
use comicvine_engine::{ComicQueries, ComicsDigest, ComicsError};
use comicvine_types::{ComicsHtmlRequest, NameRequest, PageRequest, ResourceKind, SearchRequest};
use comicvine_util::Violation;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

pub use catalog::{ToolDefinition, ToolOperation, builtin_tools};
pub use shape::{FieldSpec, FieldType, MAX_LIMIT, ToolInputShape};

/// Result of a successful tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// A serialized envelope.
    Json(Value),
    /// The HTML digest and its summary.
    Html(ComicsDigest),
}

/// Registered tools keyed by name, in catalogue order.
pub struct ToolRegistry<A> {
    tools: IndexMap<String, ToolDefinition>,
    queries: ComicQueries<A>,
}

impl<A: ComicVineApi> ToolRegistry<A> {
    /// Registry with the full built-in catalogue.
    pub fn new(api: A) -> Self {
        let tools = builtin_tools().into_iter().map(|tool| (tool.name.clone(), tool)).collect();
        Self {
            tools,
            queries: ComicQueries::new(api),
        }
    }

    pub fn tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn queries(&self) -> &ComicQueries<A> {
        &self.queries
    }

    /// Validates `arguments` against the tool's shape and runs it.
    ///
    /// Unknown names fail before any upstream call.
    pub async fn call(&self, name: &str, arguments: Option<Map<String, Value>>) -> Result<ToolOutput, ComicsError> {
        let tool = self.get(name).ok_or_else(|| ComicsError::unknown_operation(name))?;
        let mut arguments = tool.input.validate(name, arguments)?;
        debug!(tool = name, "dispatching tool call");

        let started = Instant::now();
        let queries = &self.queries;
        let output = match tool.operation {
            ToolOperation::List(kind) => ToolOutput::Json(queries.list_value(kind, &decode::<PageRequest>(name, arguments)?).await?),
            ToolOperation::ById(kind) => {
                let id = take_id(name, &mut arguments, kind.id_argument())?;
                let field_list = arguments.get("field_list").and_then(Value::as_str);
                ToolOutput::Json(queries.by_id_value(kind, id, field_list).await?)
            }
            ToolOperation::Search => to_output(queries.search(&decode::<SearchRequest>(name, arguments)?).await?)?,
            ToolOperation::IssuesByCharacterName => {
                to_output(queries.issues_by_character_name(&decode::<NameRequest>(name, arguments)?).await?)?
            }
            ToolOperation::IssuesForCharacter => {
                let id = take_id(name, &mut arguments, ResourceKind::Character.id_argument())?;
                to_output(queries.issues_for_character(id, &decode::<PageRequest>(name, arguments)?).await?)?
            }
            ToolOperation::CharactersForIssue => {
                let id = take_id(name, &mut arguments, ResourceKind::Issue.id_argument())?;
                to_output(queries.characters_for_issue(id, &decode::<PageRequest>(name, arguments)?).await?)?
            }
            ToolOperation::MoviesByCharacter => {
                to_output(queries.movies_by_character(&decode::<NameRequest>(name, arguments)?).await?)?
            }
            ToolOperation::ComicsHtml => {
                ToolOutput::Html(queries.comics_digest(&decode::<ComicsHtmlRequest>(name, arguments)?).await?)
            }
        };

        info!(tool = name, duration_ms = started.elapsed().as_millis() as u64, "tool call completed");
        Ok(output)
    }
}

/// Removes the integer id argument `key`. Its presence and type were
/// checked by the shape already.
fn take_id(tool: &str, arguments: &mut Map<String, Value>, key: &str) -> Result<i64, ComicsError> {
    arguments.remove(key).as_ref().and_then(Value::as_i64).ok_or_else(|| {
        ComicsError::validation(
            format!("{tool} arguments"),
            vec![Violation::new(format!("$.{key}"), "type", "expected integer")],
        )
    })
}

fn decode<T: DeserializeOwned>(tool: &str, arguments: Map<String, Value>) -> Result<T, ComicsError> {
    serde_json::from_value(Value::Object(arguments)).map_err(|error| {
        ComicsError::validation(format!("{tool} arguments"), vec![Violation::new("$", "type", error.to_string())])
    })
}

fn to_output<T: serde::Serialize>(envelope: T) -> Result<ToolOutput, ComicsError> {
    Ok(ToolOutput::Json(serde_json::to_value(envelope)?))
}
