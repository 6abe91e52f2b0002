use crate::view::{
    RenderError, Renderer, DASHBOARD, LOGIN, MATCHES, NOT_FOUND, PLAYERS, REGISTER, STADIUMS,
    TEAMS,
};
use serde_json::Value;

const TEAM_COLUMNS: &[(&str, &str)] = &[
    ("team_name", "Team"),
    ("country", "Country"),
    ("founded_year", "Founded"),
    ("league", "League"),
];

const PLAYER_COLUMNS: &[(&str, &str)] = &[
    ("name", "Name"),
    ("team", "Team"),
    ("position", "Position"),
    ("age", "Age"),
    ("nationality", "Nationality"),
];

const MATCH_COLUMNS: &[(&str, &str)] = &[
    ("match_date", "Date"),
    ("match_time", "Time"),
    ("home_team", "Home"),
    ("away_team", "Away"),
    ("stadium", "Stadium"),
    ("score", "Score"),
];

const STADIUM_COLUMNS: &[(&str, &str)] = &[
    ("name", "Stadium"),
    ("city", "City"),
    ("country", "Country"),
    ("capacity", "Capacity"),
    ("year_built", "Built"),
];

/// Built-in renderer producing a bare HTML page per view.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, view: &str, context: &Value) -> Result<String, RenderError> {
        let body = match view {
            DASHBOARD => dashboard_body(context),
            LOGIN => form_body("/login", "Log in", true),
            REGISTER => form_body("/register", "Register", false),
            NOT_FOUND => "<p>Page not found.</p>".to_string(),
            TEAMS => table_body(TEAM_COLUMNS, context),
            PLAYERS => table_body(PLAYER_COLUMNS, context),
            MATCHES => table_body(MATCH_COLUMNS, context),
            STADIUMS => table_body(STADIUM_COLUMNS, context),
            other => return Err(RenderError::UnknownView(other.to_string())),
        };
        Ok(layout(context, &body))
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => escape_html(s),
        Some(Value::Bool(b)) => (if *b { "yes" } else { "no" }).to_string(),
        Some(other) => escape_html(&other.to_string()),
    }
}

fn layout(context: &Value, body: &str) -> String {
    let title = context
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("League");
    let username = context.get("username").and_then(Value::as_str);

    let mut page = String::new();
    page.push_str(&format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n",
        escape_html(title)
    ));

    page.push_str("<nav>");
    match username {
        Some(name) => {
            page.push_str(&format!(
                "<a href=\"/dashboard\">Dashboard</a> <a href=\"/teams\">Teams</a> \
                 <a href=\"/players\">Players</a> <a href=\"/matches\">Matches</a> \
                 <a href=\"/stadiums\">Stadiums</a> <span class=\"user\">Signed in as {}</span> \
                 <a href=\"/logout\">Log out</a>",
                escape_html(name)
            ));
        }
        None => page.push_str(
            "<a href=\"/login\">Log in</a> <a href=\"/register\">Register</a> \
             <a href=\"/guest-login\">Continue as guest</a>",
        ),
    }
    page.push_str("</nav>\n");

    if let Some(notice) = context.get("notice").filter(|n| !n.is_null()) {
        let level = notice.get("level").and_then(Value::as_str).unwrap_or("error");
        let message = notice.get("message").and_then(Value::as_str).unwrap_or("");
        page.push_str(&format!(
            "<div class=\"notice notice-{}\">{}</div>\n",
            escape_html(level),
            escape_html(message)
        ));
    }

    page.push_str(&format!(
        "<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    ));
    page
}

fn dashboard_body(context: &Value) -> String {
    match context.get("username").and_then(Value::as_str) {
        Some(name) => format!(
            "<p>Welcome, {}. Browse teams, players, matches and stadiums.</p>",
            escape_html(name)
        ),
        None => "<p>Log in, register or continue as a guest to browse the league.</p>".to_string(),
    }
}

fn form_body(action: &str, submit: &str, offer_guest: bool) -> String {
    let mut form = format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">{submit}</button>\n</form>"
    );
    if offer_guest {
        form.push_str("\n<p><a href=\"/guest-login\">Continue as guest</a></p>");
    }
    form
}

fn table_body(columns: &[(&str, &str)], context: &Value) -> String {
    let rows = context
        .get("rows")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut table = String::from("<table>\n<thead><tr>");
    for (_, label) in columns {
        table.push_str(&format!("<th>{label}</th>"));
    }
    table.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        table.push_str("<tr>");
        for (key, _) in columns {
            table.push_str(&format!("<td>{}</td>", cell_text(row.get(*key))));
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</tbody>\n</table>");
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_view_is_an_error() {
        let err = HtmlRenderer.render("scores", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::UnknownView(view) if view == "scores"));
    }

    #[test]
    fn listing_renders_one_row_per_entity_with_empty_cells_for_nulls() {
        let context = json!({
            "title": "Players",
            "username": "alice",
            "notice": null,
            "rows": [
                {"id": 1, "name": "Anon", "team": null, "position": "GK", "age": 30, "nationality": null}
            ]
        });
        let html = HtmlRenderer.render(PLAYERS, &context).unwrap();
        assert_eq!(html.matches("<tr><td>").count(), 1);
        assert!(html.contains("<td>Anon</td><td></td><td>GK</td><td>30</td><td></td>"));
        assert!(html.contains("Signed in as alice"));
    }

    #[test]
    fn notice_and_user_content_are_escaped() {
        let context = json!({
            "title": "Teams",
            "username": "<b>eve</b>",
            "notice": {"level": "error", "message": "Error fetching teams: <oops>"},
            "rows": []
        });
        let html = HtmlRenderer.render(TEAMS, &context).unwrap();
        assert!(html.contains("&lt;b&gt;eve&lt;/b&gt;"));
        assert!(html.contains("<div class=\"notice notice-error\">Error fetching teams: &lt;oops&gt;</div>"));
    }

    #[test]
    fn anonymous_pages_offer_login_and_guest_entry() {
        let html = HtmlRenderer
            .render(LOGIN, &json!({"title": "Log in", "username": null}))
            .unwrap();
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("href=\"/guest-login\""));
        assert!(!html.contains("Log out"));
    }
}
