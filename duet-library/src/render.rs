//! HTML rendering of the composed library view
//!
//! Produces the fragment embedded by the container (or by the standalone
//! page shell). Pure string building over the composed listing; all song
//! data is escaped on the way out.

use crate::view::{Listing, SongGroup};
use duet_common::{Role, Song, SongField, ViewQuery};

/// Where the rendered mutation controls submit to
///
/// The delete route carries an `{id}` placeholder replaced per song.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRoutes {
    pub add: String,
    pub delete: String,
}

impl ActionRoutes {
    /// Routes of the module's own store, used in standalone mode
    pub fn local() -> Self {
        Self {
            add: "/songs".to_string(),
            delete: "/songs/{id}".to_string(),
        }
    }
}

/// Render the library fragment
pub fn render_library(
    role: Role,
    listing: &Listing,
    query: &ViewQuery,
    actions: &ActionRoutes,
) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"library\" data-count=\"{}\">\n",
        listing.len()
    ));
    html.push_str("<h2>Music Library</h2>\n");
    html.push_str(&render_controls(query));
    if role.is_admin() {
        html.push_str(&render_add_form(&actions.add));
    }
    match listing {
        Listing::Flat(songs) => {
            html.push_str("<div class=\"songs\">\n");
            if songs.is_empty() {
                html.push_str("<p class=\"muted\">No songs found</p>\n");
            }
            for song in songs {
                html.push_str(&render_row(song, role, &actions.delete));
            }
            html.push_str("</div>\n");
        }
        Listing::Grouped { field, groups } => {
            html.push_str("<div class=\"songs\">\n");
            if groups.is_empty() {
                html.push_str("<p class=\"muted\">No songs found</p>\n");
            }
            for group in groups {
                html.push_str(&render_group(group, *field, role, &actions.delete));
            }
            html.push_str("</div>\n");
        }
    }
    html.push_str("</div>\n");
    html
}

fn render_controls(query: &ViewQuery) -> String {
    format!(
        concat!(
            "<div class=\"controls\">\n",
            "<input type=\"search\" name=\"search\" placeholder=\"Search...\" value=\"{search}\">\n",
            "<select name=\"filter_by\" title=\"Filter by\">{filter}</select>\n",
            "<select name=\"sort_by\" title=\"Sort by\">{sort}</select>\n",
            "<select name=\"group_by\" title=\"Group by\">{group}</select>\n",
            "</div>\n",
        ),
        search = escape(&query.search),
        filter = field_options(Some(query.filter_by)),
        sort = field_options(Some(query.sort_by)),
        group = group_options(query.group_by),
    )
}

const FIELDS: [SongField; 3] = [SongField::Title, SongField::Artist, SongField::Album];

fn field_label(field: SongField) -> &'static str {
    match field {
        SongField::Title => "Title",
        SongField::Artist => "Artist",
        SongField::Album => "Album",
    }
}

fn field_options(selected: Option<SongField>) -> String {
    FIELDS
        .iter()
        .map(|field| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                field.as_str(),
                if selected == Some(*field) { " selected" } else { "" },
                field_label(*field)
            )
        })
        .collect()
}

fn group_options(selected: Option<SongField>) -> String {
    let mut options = format!(
        "<option value=\"\"{}>No Grouping</option>",
        if selected.is_none() { " selected" } else { "" }
    );
    options.push_str(&field_options(selected));
    options
}

fn render_add_form(add_route: &str) -> String {
    format!(
        concat!(
            "<form class=\"add-form\" action=\"{action}\" method=\"post\">\n",
            "<input name=\"title\" placeholder=\"Title\" required>\n",
            "<input name=\"artist\" placeholder=\"Artist\" required>\n",
            "<input name=\"album\" placeholder=\"Album (optional)\">\n",
            "<button type=\"submit\">Add Song</button>\n",
            "</form>\n",
        ),
        action = escape(add_route),
    )
}

fn render_group(group: &SongGroup, field: SongField, role: Role, delete_route: &str) -> String {
    let mut html = format!(
        "<div class=\"song-group\">\n<h3>{}: {} ({})</h3>\n",
        field,
        escape(&group.key),
        group.songs.len()
    );
    for song in &group.songs {
        html.push_str(&render_row(song, role, delete_route));
    }
    html.push_str("</div>\n");
    html
}

fn render_row(song: &Song, role: Role, delete_route: &str) -> String {
    let album = if song.album.is_empty() {
        String::new()
    } else {
        format!(" · <i>{}</i>", escape(&song.album))
    };
    let delete = if role.is_admin() {
        format!(
            "<button class=\"delete-btn\" data-action=\"{}\">Delete</button>",
            escape(&delete_route.replace("{id}", &song.id))
        )
    } else {
        String::new()
    };
    format!(
        "<div class=\"song-row\" data-id=\"{id}\">\n<span><b>{title}</b> — {artist}{album}</span>{delete}\n</div>\n",
        id = escape(&song.id),
        title = escape(&song.title),
        artist = escape(&song.artist),
        album = album,
        delete = delete,
    )
}

/// Minimal HTML escaping for text and double-quoted attribute positions
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
