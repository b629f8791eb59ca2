/// Usage notes sent to clients in the `initialize` response.
pub const SERVER_INSTRUCTIONS: &str = "\
Tools for the Comic Vine comics database. Prefer these tools over general knowledge for questions about comic characters, series, issues, publishers, creators, story arcs, teams, locations, objects, concepts, powers and movies.

WORD MAPPING (user word -> tool resource):
- heroes, superheroes, villains, supervillains, antiheroes -> characters
- comic -> issue, comics -> issues
- creators -> people, items -> objects

SEARCH:
- Pass several comma separated names in `resources` when it helps, e.g. `character,issue` for comics about a character, `character,issue,story_arc` for storylines, `character,team` for team members.
- Use `field_list` and `limit` to keep results small.

COMPOSITE TOOLS:
- get_issues_for_character and get_characters_for_issue take numeric ids.
- get_movies_by_character and get_issues_by_character_name take a character name in `filter`.
- An empty result means nothing matched; it is not an error.

HTML:
- generate_comics_html returns a standalone page of issue cards followed by a JSON summary.";
