//! HTML rendering for the chartlist form
//!
//! The page is the input form followed by one notice: the success summary
//! or an inline, color-coded error naming the stage that failed.

use crate::error::{DateError, PipelineError};
use crate::services::PipelineOutcome;
use crate::spotify::SpotifyError;

/// Color of validation errors (the user can fix the input)
const INPUT_ERROR_COLOR: &str = "red";
/// Color of upstream errors (chart source or Spotify)
const UPSTREAM_ERROR_COLOR: &str = "#d97706";

/// Full page: header, form, then `notice` (already HTML)
pub fn render_page(notice: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");
    let build_profile = env!("BUILD_PROFILE");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Billboard Hot 100 Playlist</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            max-width: 800px;
            margin: 40px auto;
            padding: 20px;
            line-height: 1.6;
        }}
        h2 {{
            color: #1db954;
        }}
        .build-info {{
            color: #888;
            font-size: 12px;
            font-family: 'Courier New', monospace;
        }}
    </style>
</head>
<body>
    <h2>Create Billboard Top 100 Spotify Playlist</h2>
    <form method="POST" action="/">
        <label for="date">Enter a date (YYYY-MM-DD): </label>
        <input type="text" id="date" name="date" placeholder="YYYY-MM-DD" required>
        <button type="submit">Generate Playlist</button>
    </form>
    {notice}
    <p class="build-info">chartlist v{version} ({git_hash}, {build_profile})</p>
</body>
</html>"#,
        notice = notice,
        version = version,
        git_hash = git_hash,
        build_profile = build_profile,
    )
}

/// Notice for a finished pipeline run
pub fn render_result(result: &Result<PipelineOutcome, PipelineError>) -> String {
    match result {
        Ok(outcome) => success_notice(outcome),
        Err(err) => error_notice(err),
    }
}

/// Playlist link plus the first chart titles
pub fn success_notice(outcome: &PipelineOutcome) -> String {
    let items: String = outcome
        .preview()
        .iter()
        .map(|title| format!("<li>{}</li>", escape_html(title)))
        .collect();

    format!(
        "<p>✅ Playlist Created: <a href='{}' target='_blank'>View on Spotify</a></p>\
         <h4>Top 10 Songs:</h4><ol>{}</ol>",
        escape_html(&outcome.playlist.url),
        items
    )
}

/// Inline message describing which stage failed
pub fn error_notice(err: &PipelineError) -> String {
    match err {
        PipelineError::Date(DateError::InFuture(_)) => error_paragraph(
            INPUT_ERROR_COLOR,
            "❌ Billboard Hot 100 is not available for future dates!",
        ),
        PipelineError::Date(DateError::Unparsable(input)) => error_paragraph(
            INPUT_ERROR_COLOR,
            &format!(
                "❌ '{}' is not a valid date. Please use the YYYY-MM-DD format.",
                escape_html(input)
            ),
        ),
        PipelineError::Fetch(e) => error_paragraph(
            UPSTREAM_ERROR_COLOR,
            &format!("⚠️ Error fetching Billboard data: {}", escape_html(&e.to_string())),
        ),
        PipelineError::Parse(_) => error_paragraph(
            UPSTREAM_ERROR_COLOR,
            "⚠️ No songs found for the given date. Please try another date.",
        ),
        PipelineError::Provider(e) => provider_error_notice(e),
    }
}

/// Inline message for a Spotify failure
pub fn provider_error_notice(err: &SpotifyError) -> String {
    if let SpotifyError::AuthorizationRequired { authorize_url } = err {
        return error_paragraph(
            UPSTREAM_ERROR_COLOR,
            &format!(
                "⚠️ Spotify authorization required: <a href='{}'>connect your Spotify account</a>, \
                 then submit the date again.",
                escape_html(authorize_url)
            ),
        );
    }

    if err.is_invalid_client() {
        return error_paragraph(
            UPSTREAM_ERROR_COLOR,
            "⚠️ Invalid Spotify credentials. Please check your .env file.",
        );
    }

    error_paragraph(
        UPSTREAM_ERROR_COLOR,
        &format!("⚠️ Spotify API Error: {}", escape_html(&err.to_string())),
    )
}

/// `<p>` in the given color around `message` (already HTML)
pub fn error_paragraph(color: &str, message: &str) -> String {
    format!("<p class='error' style='color:{};'>{}</p>", color, message)
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, ParseError};
    use crate::services::{validate_date, Resolution};
    use crate::types::CreatedPlaylist;
    use chrono::NaiveDate;

    fn outcome(titles: &[&str]) -> PipelineOutcome {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PipelineOutcome {
            date: validate_date("2020-01-01", today).unwrap(),
            playlist: CreatedPlaylist {
                id: "pl1".to_string(),
                url: "https://open.spotify.com/playlist/pl1".to_string(),
            },
            titles: titles.iter().map(|t| t.to_string()).collect(),
            resolution: Resolution::default(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_success_notice_previews_at_most_ten() {
        let titles: Vec<String> = (1..=15).map(|i| format!("Song {}", i)).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();

        let html = success_notice(&outcome(&refs));

        assert_eq!(html.matches("<li>").count(), 10);
        assert!(html.contains("<li>Song 10</li>"));
        assert!(!html.contains("Song 11"));
        assert!(html.contains("href='https://open.spotify.com/playlist/pl1'"));
    }

    #[test]
    fn test_success_notice_escapes_titles() {
        let html = success_notice(&outcome(&["<script>alert(1)</script>"]));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_error_notices_name_the_stage() {
        let future = PipelineError::Date(DateError::InFuture(
            NaiveDate::from_ymd_opt(2999, 1, 1).unwrap(),
        ));
        assert!(error_notice(&future).contains("not available for future dates"));

        let fetch = PipelineError::Fetch(FetchError::Status {
            status: 404,
            reason: "Client Error: Not Found".to_string(),
            url: "https://example.com/2020-01-01".to_string(),
        });
        let html = error_notice(&fetch);
        assert!(html.contains("Error fetching Billboard data: 404 Client Error: Not Found"));

        let empty = PipelineError::Parse(ParseError::NoSongs);
        assert!(error_notice(&empty).contains("No songs found"));
    }

    #[test]
    fn test_invalid_client_gets_credentials_message() {
        let err = SpotifyError::Api {
            status: 400,
            message: "invalid_client: Invalid client".to_string(),
        };
        let html = provider_error_notice(&err);

        assert!(html.contains("Invalid Spotify credentials"));
        assert!(!html.contains("Spotify API Error"));
    }

    #[test]
    fn test_other_provider_error_passes_message_through() {
        let err = SpotifyError::Api {
            status: 403,
            message: "Insufficient client scope".to_string(),
        };
        let html = provider_error_notice(&err);

        assert!(html.contains("Spotify API Error: http status: 403, Insufficient client scope"));
    }

    #[test]
    fn test_authorization_required_links_to_provider() {
        let err = SpotifyError::AuthorizationRequired {
            authorize_url: "https://accounts.spotify.com/authorize?client_id=a&scope=b".to_string(),
        };
        let html = provider_error_notice(&err);

        assert!(html.contains("href='https://accounts.spotify.com/authorize?client_id=a&amp;scope=b'"));
    }

    #[test]
    fn test_page_contains_form_and_notice() {
        let page = render_page("<p>hello</p>");
        assert!(page.contains("<form method=\"POST\" action=\"/\">"));
        assert!(page.contains("name=\"date\""));
        assert!(page.contains("<p>hello</p>"));
    }
}
