//! Single-call and multi-step query operations.
//!
//! Composite operations share one pipeline:
//!
//! 1. **Resolve** an anchor entity through the search endpoint, asking only
//!    for identity plus the cross-reference field needed next.
//! 2. **Guard**: no anchor, or a cross-reference that is empty or not an
//!    array, short-circuits to the empty envelope. No further calls are made.
//! 3. **Extract** the referenced names and join them with ` OR `.
//! 4. **Fetch** with the derived query and the caller's paging.
//! 5. **Normalize** through [`wrap_collection`].
//!
//! Calls are strictly sequential since each step's parameters come from the
//! previous result. Any gateway failure aborts the whole operation.

use comicvine_api::ComicVineApi;
use comicvine_types::{
    Character, ComicsHtmlRequest, CrossReference, Envelope, Issue, Movie, NameRequest, PageRequest, Publisher,
    RecordShape, Resource, ResourceKind, SearchRequest, SearchResult, Team, Volume,
};
use comicvine_util::{QueryParams, normalize_query_params};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::html::{ComicsDigest, render_comics_html};
use crate::normalize::{empty_page, wrap_collection, wrap_single};
use crate::ComicsError;

const SEARCH_PATH: &str = "/search";

/// Query operations over a gateway.
pub struct ComicQueries<A> {
    api: A,
}

impl<A: ComicVineApi> ComicQueries<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Lists records of one kind from its collection endpoint, requesting the
    /// kind's default field list unless the caller named one.
    pub async fn list<R: RecordShape>(&self, kind: ResourceKind, page: &PageRequest) -> Result<Envelope<Vec<R>>, ComicsError> {
        let mut page = page.clone();
        if page.field_list.is_none() {
            page.field_list = kind.default_field_list().map(str::to_string);
        }
        let payload = self.fetch(&kind.collection_path(), &page).await?;
        wrap_collection(payload)
    }

    /// Fetches one record from its detail endpoint, `/{kind}/{prefix}-{id}/`.
    pub async fn by_id<R: RecordShape>(
        &self,
        kind: ResourceKind,
        id: i64,
        field_list: Option<&str>,
    ) -> Result<Envelope<R>, ComicsError> {
        let page = PageRequest {
            field_list: field_list.or(kind.default_field_list()).map(str::to_string),
            ..PageRequest::default()
        };
        let payload = self.fetch(&kind.detail_path(id), &page).await?;
        wrap_single(payload)
    }

    /// [`Self::list`] with the record type picked from the kind, serialized.
    pub async fn list_value(&self, kind: ResourceKind, page: &PageRequest) -> Result<Value, ComicsError> {
        match kind {
            ResourceKind::Character => to_json(self.list::<Character>(kind, page).await?),
            ResourceKind::Issue => to_json(self.list::<Issue>(kind, page).await?),
            ResourceKind::Movie => to_json(self.list::<Movie>(kind, page).await?),
            ResourceKind::Publisher => to_json(self.list::<Publisher>(kind, page).await?),
            ResourceKind::Team => to_json(self.list::<Team>(kind, page).await?),
            ResourceKind::Volume => to_json(self.list::<Volume>(kind, page).await?),
            _ => to_json(self.list::<Resource>(kind, page).await?),
        }
    }

    /// [`Self::by_id`] with the record type picked from the kind, serialized.
    pub async fn by_id_value(&self, kind: ResourceKind, id: i64, field_list: Option<&str>) -> Result<Value, ComicsError> {
        match kind {
            ResourceKind::Character => to_json(self.by_id::<Character>(kind, id, field_list).await?),
            ResourceKind::Issue => to_json(self.by_id::<Issue>(kind, id, field_list).await?),
            ResourceKind::Movie => to_json(self.by_id::<Movie>(kind, id, field_list).await?),
            ResourceKind::Publisher => to_json(self.by_id::<Publisher>(kind, id, field_list).await?),
            ResourceKind::Team => to_json(self.by_id::<Team>(kind, id, field_list).await?),
            ResourceKind::Volume => to_json(self.by_id::<Volume>(kind, id, field_list).await?),
            _ => to_json(self.by_id::<Resource>(kind, id, field_list).await?),
        }
    }

    /// Pass-through to the multi-resource search endpoint.
    pub async fn search(&self, request: &SearchRequest) -> Result<Envelope<Vec<SearchResult>>, ComicsError> {
        wrap_collection(self.fetch(SEARCH_PATH, request).await?)
    }

    /// Issues matching a free-text character name, in one search call.
    pub async fn issues_by_character_name(&self, request: &NameRequest) -> Result<Envelope<Vec<Issue>>, ComicsError> {
        let search = follow_up_search(request.filter.clone(), ResourceKind::Issue, request.field_list.clone(), request.limit, request.offset);
        wrap_collection(self.fetch(SEARCH_PATH, &search).await?)
    }

    /// Issues featuring the character with `character_id`, found by the
    /// character's name.
    pub async fn issues_for_character(
        &self,
        character_id: i64,
        page: &PageRequest,
    ) -> Result<Envelope<Vec<Issue>>, ComicsError> {
        let anchor = self
            .resolve_anchor(ResourceKind::Character.encode_id(character_id), ResourceKind::Character, "id,name", None)
            .await?;
        let Some(name) = anchor.map(|anchor| anchor.name).filter(|name| !name.trim().is_empty()) else {
            return Ok(empty_page(page.limit, page.offset));
        };

        let search = follow_up_search(name, ResourceKind::Issue, page.field_list.clone(), page.limit, page.offset);
        wrap_collection(self.fetch(SEARCH_PATH, &search).await?)
    }

    /// Characters credited in the issue with `issue_id`.
    pub async fn characters_for_issue(
        &self,
        issue_id: i64,
        page: &PageRequest,
    ) -> Result<Envelope<Vec<Character>>, ComicsError> {
        let anchor = self
            .resolve_anchor(
                ResourceKind::Issue.encode_id(issue_id),
                ResourceKind::Issue,
                "id,name,character_credits",
                Some("character_credits"),
            )
            .await?;
        let Some(query) = anchor.and_then(|anchor| disjunction(anchor.character_credits.as_deref())) else {
            return Ok(empty_page(page.limit, page.offset));
        };

        let search = follow_up_search(query, ResourceKind::Character, page.field_list.clone(), page.limit, page.offset);
        wrap_collection(self.fetch(SEARCH_PATH, &search).await?)
    }

    /// Movies featuring the first character matching `request.filter`.
    pub async fn movies_by_character(&self, request: &NameRequest) -> Result<Envelope<Vec<Movie>>, ComicsError> {
        let anchor = self
            .resolve_anchor(request.filter.clone(), ResourceKind::Character, "id,name,movies", Some("movies"))
            .await?;
        let Some(query) = anchor.and_then(|anchor| disjunction(anchor.movies.as_deref())) else {
            return Ok(empty_page(request.limit, request.offset));
        };

        let search = follow_up_search(query, ResourceKind::Movie, request.field_list.clone(), request.limit, request.offset);
        wrap_collection(self.fetch(SEARCH_PATH, &search).await?)
    }

    /// Fetches issues and renders them as a standalone HTML page.
    pub async fn comics_digest(&self, request: &ComicsHtmlRequest) -> Result<ComicsDigest, ComicsError> {
        let page = PageRequest {
            field_list: request
                .field_list
                .clone()
                .or_else(|| ResourceKind::Issue.default_field_list().map(str::to_string)),
            limit: Some(request.limit.unwrap_or(ComicsHtmlRequest::DEFAULT_LIMIT)),
            offset: request.offset,
            sort: request.order_by.clone(),
            filter: request.filter(),
        };
        let envelope: Envelope<Vec<Issue>> = wrap_collection(self.fetch(&ResourceKind::Issue.collection_path(), &page).await?)?;
        let count = envelope.results.len();
        let total = envelope.number_of_total_results;
        debug!(count, total, "rendering comics digest");

        Ok(ComicsDigest {
            html: render_comics_html(&envelope.results, request.title()),
            count,
            total,
            message: format!("Generated HTML page with {count} of {total} issues"),
        })
    }

    /// Step 1 of the composite pipeline. Only the first hit is decoded; a
    /// `cross_reference` field on it that is not an array counts as absent.
    async fn resolve_anchor(
        &self,
        query: String,
        kind: ResourceKind,
        field_list: &str,
        cross_reference: Option<&str>,
    ) -> Result<Option<SearchResult>, ComicsError> {
        let request = SearchRequest::new(query)
            .with_resources(kind.resource_name())
            .with_field_list(field_list);
        let (candidates, payload) = first_candidate(self.fetch(SEARCH_PATH, &request).await?, cross_reference);
        let envelope: Envelope<Vec<SearchResult>> = wrap_collection(payload)?;
        let anchor = envelope.results.into_iter().next();
        match &anchor {
            Some(anchor) => debug!(
                query = %request.query,
                anchor_id = anchor.id,
                anchor_name = %anchor.name,
                candidates,
                "resolved anchor"
            ),
            None => debug!(query = %request.query, "no anchor found"),
        }
        Ok(anchor)
    }

    async fn fetch<T: Serialize>(&self, path: &str, options: &T) -> Result<Value, ComicsError> {
        let params = option_bag(options)?;
        Ok(self.api.get(path, &params).await?)
    }
}

/// Search request for the fetch step, defaulting the field list to the
/// target kind's.
fn follow_up_search(
    query: String,
    target: ResourceKind,
    field_list: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> SearchRequest {
    SearchRequest {
        query,
        resources: Some(target.resource_name().to_string()),
        field_list: field_list.or_else(|| target.default_field_list().map(str::to_string)),
        limit,
        offset,
    }
}

/// Cuts an anchor search page down to its first hit and counts the
/// candidates. Payloads that are not objects, and `results` of any other
/// type, are left for the normalizer to reject.
fn first_candidate(payload: Value, cross_reference: Option<&str>) -> (usize, Value) {
    let mut envelope = match payload {
        Value::Object(envelope) => envelope,
        other => return (0, other),
    };
    let candidates = match envelope.remove("results") {
        Some(Value::Array(records)) => records,
        Some(record @ Value::Object(_)) => vec![record],
        Some(other) => {
            envelope.insert("results".into(), other);
            return (0, Value::Object(envelope));
        }
        None => Vec::new(),
    };

    let count = candidates.len();
    if let Some(mut first) = candidates.into_iter().next() {
        if let (Some(field), Value::Object(record)) = (cross_reference, &mut first)
            && record.get(field).is_some_and(|value| !value.is_array())
        {
            record.remove(field);
        }
        envelope.insert("results".into(), Value::Array(vec![first]));
    }
    (count, Value::Object(envelope))
}

/// Joins non-empty stub names with ` OR `. `None` when nothing is left.
fn disjunction(stubs: Option<&[CrossReference]>) -> Option<String> {
    let names: Vec<&str> = stubs
        .unwrap_or_default()
        .iter()
        .map(|stub| stub.name.trim())
        .filter(|name| !name.is_empty())
        .collect();
    (!names.is_empty()).then(|| names.join(" OR "))
}

fn option_bag<T: Serialize>(options: &T) -> Result<QueryParams, ComicsError> {
    match serde_json::to_value(options)? {
        Value::Object(map) => Ok(normalize_query_params(&map)),
        _ => Ok(QueryParams::new()),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ComicsError> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use comicvine_api::ApiError;
    use comicvine_api::testing::ScriptedApi;
    use serde_json::json;

    #[tokio::test]
    async fn issues_for_character_stops_when_anchor_is_missing() {
        let queries = ComicQueries::new(ScriptedApi::new().respond(json!({ "status_code": 1, "results": [] })));
        let page = PageRequest::default().with_limit(10).with_offset(0);

        let envelope = queries.issues_for_character(1443, &page).await.unwrap();

        assert_eq!(envelope, Envelope::empty(10, 0));
        let calls = queries.api().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "/search");
        assert_eq!(calls[0].param("query").as_deref(), Some("4005-1443"));
        assert_eq!(calls[0].param("resources").as_deref(), Some("character"));
        assert_eq!(calls[0].param("field_list").as_deref(), Some("id,name"));
    }

    #[tokio::test]
    async fn issues_for_character_searches_by_anchor_name() {
        let api = ScriptedApi::new()
            .respond(json!({ "results": [{ "id": 1443, "name": "Superman", "resource_type": "character" }] }))
            .respond(json!({ "number_of_total_results": 2, "results": [{ "id": 1 }, { "id": 2 }] }));
        let queries = ComicQueries::new(api);

        let envelope = queries
            .issues_for_character(1443, &PageRequest::default().with_limit(2))
            .await
            .unwrap();

        assert_eq!(envelope.results.len(), 2);
        let calls = queries.api().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].param("query").as_deref(), Some("Superman"));
        assert_eq!(calls[1].param("resources").as_deref(), Some("issue"));
        assert_eq!(calls[1].param("limit").as_deref(), Some("2"));
        assert_eq!(
            calls[1].param("field_list").as_deref(),
            ResourceKind::Issue.default_field_list()
        );
    }

    #[tokio::test]
    async fn movies_by_character_joins_movie_names() {
        let api = ScriptedApi::new()
            .respond(json!({
                "results": [{
                    "id": 1699,
                    "name": "Batman",
                    "movies": [{ "name": "Man of Steel" }, { "name": "Batman v Superman" }]
                }]
            }))
            .respond(json!({ "results": [{ "id": 1, "name": "Man of Steel" }, { "id": 2, "name": null }] }));
        let queries = ComicQueries::new(api);
        let request = NameRequest {
            filter: "Batman".into(),
            ..NameRequest::default()
        };

        let envelope = queries.movies_by_character(&request).await.unwrap();

        let calls = queries.api().calls();
        assert_eq!(calls[0].param("field_list").as_deref(), Some("id,name,movies"));
        assert_eq!(calls[1].param("query").as_deref(), Some("Man of Steel OR Batman v Superman"));
        assert_eq!(calls[1].param("resources").as_deref(), Some("movie"));
        assert_eq!(envelope.results[1].name.as_deref(), Some("Unknown Movie"));
    }

    #[tokio::test]
    async fn movies_by_character_without_movies_is_empty() {
        let api = ScriptedApi::new().respond(json!({ "results": [{ "id": 1699, "name": "Batman", "movies": [] }] }));
        let queries = ComicQueries::new(api);
        let request = NameRequest {
            filter: "Batman".into(),
            limit: Some(5),
            ..NameRequest::default()
        };

        let envelope = queries.movies_by_character(&request).await.unwrap();

        assert_eq!(envelope, Envelope::empty(5, 0));
        assert_eq!(queries.api().calls().len(), 1);
    }

    #[tokio::test]
    async fn movies_that_are_not_a_list_short_circuit() {
        let api = ScriptedApi::new().respond(json!({ "results": [{ "id": 1699, "name": "Batman", "movies": {} }] }));
        let queries = ComicQueries::new(api);
        let request = NameRequest {
            filter: "Batman".into(),
            ..NameRequest::default()
        };

        let envelope = queries.movies_by_character(&request).await.unwrap();

        assert_eq!(envelope, Envelope::empty(20, 0));
        assert_eq!(queries.api().calls().len(), 1);
    }

    #[tokio::test]
    async fn character_credits_that_are_not_a_list_short_circuit() {
        let api = ScriptedApi::new().respond(json!({ "results": [{ "id": 6, "character_credits": "none" }] }));
        let queries = ComicQueries::new(api);

        let envelope = queries.characters_for_issue(6, &PageRequest::default()).await.unwrap();

        assert_eq!(envelope, Envelope::empty(20, 0));
        assert_eq!(queries.api().calls().len(), 1);
    }

    #[tokio::test]
    async fn only_the_first_anchor_candidate_is_decoded() {
        let api = ScriptedApi::new()
            .respond(json!({
                "number_of_total_results": 2,
                "results": [{ "id": 1443, "name": "Superman" }, { "name": "Superman (Earth-2)" }]
            }))
            .respond(json!({ "results": [{ "id": 1, "name": "Action Comics #1" }] }));
        let queries = ComicQueries::new(api);

        let envelope = queries.issues_for_character(1443, &PageRequest::default()).await.unwrap();

        assert_eq!(envelope.results.len(), 1);
        let calls = queries.api().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].param("query").as_deref(), Some("Superman"));
    }

    #[test]
    fn first_candidate_keeps_one_hit_and_drops_a_malformed_cross_reference() {
        let payload = json!({
            "limit": 10,
            "results": [{ "id": 6, "character_credits": "none" }, { "name": "no id" }]
        });
        let (count, trimmed) = first_candidate(payload, Some("character_credits"));
        assert_eq!(count, 2);
        assert_eq!(trimmed, json!({ "limit": 10, "results": [{ "id": 6 }] }));

        let (count, untouched) = first_candidate(json!({ "results": "oops" }), None);
        assert_eq!(count, 0);
        assert_eq!(untouched, json!({ "results": "oops" }));
    }

    #[tokio::test]
    async fn characters_for_issue_uses_credit_names() {
        let api = ScriptedApi::new()
            .respond(json!({
                "results": [{
                    "id": 6,
                    "name": "Action Comics",
                    "character_credits": [{ "id": 1, "name": "Superman" }, { "id": 2, "name": null }, { "id": 3, "name": "Lois Lane" }]
                }]
            }))
            .respond(json!({ "results": [{ "id": 1, "name": "Superman" }, { "id": 3, "name": "Lois Lane" }] }));
        let queries = ComicQueries::new(api);

        let envelope = queries.characters_for_issue(6, &PageRequest::default()).await.unwrap();

        assert_eq!(envelope.results.len(), 2);
        let calls = queries.api().calls();
        assert_eq!(calls[0].param("query").as_deref(), Some("4000-6"));
        assert_eq!(calls[1].param("query").as_deref(), Some("Superman OR Lois Lane"));
        assert_eq!(calls[1].param("resources").as_deref(), Some("character"));
    }

    #[tokio::test]
    async fn gateway_failure_in_follow_up_aborts_the_operation() {
        let api = ScriptedApi::new()
            .respond(json!({ "results": [{ "id": 1443, "name": "Superman" }] }))
            .fail(ApiError::Upstream {
                status: 502,
                body: "Bad Gateway".into(),
            });
        let queries = ComicQueries::new(api);

        let error = queries.issues_for_character(1443, &PageRequest::default()).await.unwrap_err();

        assert!(matches!(error, ComicsError::Api(ApiError::Upstream { status: 502, .. })));
    }

    #[tokio::test]
    async fn list_applies_default_field_list_and_paging() {
        let api = ScriptedApi::new().respond(json!({ "results": [{ "id": 1, "name": "Batman" }] }));
        let queries = ComicQueries::new(api);
        let page = PageRequest::default().with_limit(1).with_filter("name:Batman");

        let envelope: Envelope<Vec<Character>> = queries.list(ResourceKind::Character, &page).await.unwrap();

        assert_eq!(envelope.results[0].name.as_deref(), Some("Batman"));
        let calls = queries.api().calls();
        assert_eq!(calls[0].path, "/characters");
        assert_eq!(calls[0].param("filter").as_deref(), Some("name:Batman"));
        assert_eq!(calls[0].param("limit").as_deref(), Some("1"));
        assert!(calls[0].param("offset").is_none());
        assert_eq!(
            calls[0].param("field_list").as_deref(),
            ResourceKind::Character.default_field_list()
        );
    }

    #[tokio::test]
    async fn list_without_default_field_list_omits_the_parameter() {
        let api = ScriptedApi::new().respond(json!({ "results": [{ "id": 1, "name": "Flight", "count_of_issue_appearances": 3 }] }));
        let queries = ComicQueries::new(api);

        let value = queries.list_value(ResourceKind::Power, &PageRequest::default()).await.unwrap();

        assert_eq!(value["results"][0]["count_of_issue_appearances"], json!(3));
        let calls = queries.api().calls();
        assert_eq!(calls[0].path, "/powers");
        assert!(calls[0].param("field_list").is_none());
    }

    #[tokio::test]
    async fn by_id_calls_the_detail_endpoint() {
        let api = ScriptedApi::new().respond(json!({
            "status_code": 1,
            "error": "OK",
            "results": { "id": 1443, "name": "Superman" }
        }));
        let queries = ComicQueries::new(api);

        let value = queries.by_id_value(ResourceKind::Character, 1443, Some("id,name")).await.unwrap();

        assert_eq!(value["results"]["name"], json!("Superman"));
        assert_eq!(value["number_of_total_results"], json!(1));
        let calls = queries.api().calls();
        assert_eq!(calls[0].path, "/character/4005-1443/");
        assert_eq!(calls[0].param("field_list").as_deref(), Some("id,name"));
    }

    #[tokio::test]
    async fn search_forwards_the_five_parameters() {
        let api = ScriptedApi::new().respond(json!({ "results": [{ "id": 1, "name": null }] }));
        let queries = ComicQueries::new(api);
        let request = SearchRequest {
            query: "Joker".into(),
            resources: Some("character,issue".into()),
            field_list: Some("id,name".into()),
            limit: Some(3),
            offset: Some(6),
        };

        let envelope = queries.search(&request).await.unwrap();

        assert_eq!(envelope.results[0].name, "");
        assert_eq!(envelope.results[0].resource_type.as_deref(), Some("unknown"));
        let call = &queries.api().calls()[0];
        assert_eq!(call.path, "/search");
        for (key, expected) in [
            ("query", "Joker"),
            ("resources", "character,issue"),
            ("field_list", "id,name"),
            ("limit", "3"),
            ("offset", "6"),
        ] {
            assert_eq!(call.param(key).as_deref(), Some(expected), "{key}");
        }
    }

    #[tokio::test]
    async fn digest_builds_filter_and_summary() {
        let api = ScriptedApi::new().respond(json!({
            "number_of_total_results": 57,
            "results": [{ "id": 1, "name": "The Case of the Chemical Syndicate", "issue_number": "27" }]
        }));
        let queries = ComicQueries::new(api);
        let request = ComicsHtmlRequest {
            name: Some("Detective".into()),
            issue_number: Some(27),
            order_by: Some("cover_date:asc".into()),
            ..ComicsHtmlRequest::default()
        };

        let digest = queries.comics_digest(&request).await.unwrap();

        assert_eq!(digest.count, 1);
        assert_eq!(digest.total, 57);
        assert_eq!(digest.message, "Generated HTML page with 1 of 57 issues");
        assert!(digest.html.contains("The Case of the Chemical Syndicate"));
        let call = &queries.api().calls()[0];
        assert_eq!(call.path, "/issues");
        assert_eq!(call.param("filter").as_deref(), Some("name:Detective,issue_number:27"));
        assert_eq!(call.param("sort").as_deref(), Some("cover_date:asc"));
        assert_eq!(call.param("limit").as_deref(), Some("20"));
    }

    #[test]
    fn disjunction_skips_blank_names() {
        let stubs = vec![
            CrossReference::named("Man of Steel"),
            CrossReference::named(" "),
            CrossReference::named("Batman v Superman"),
        ];
        assert_eq!(disjunction(Some(stubs.as_slice())).as_deref(), Some("Man of Steel OR Batman v Superman"));
        assert_eq!(disjunction(Some(&[][..])), None);
        assert_eq!(disjunction(None), None);
    }
}
