//! HTML pages.

use super::flash::{Flash, FlashCategory};

const FLASH_BASE_STYLE: &str = "color: #333; padding: 10px; border: 1px solid #ccc; margin-bottom: 10px;";

/// Escape text for element content and double-quoted attributes.
pub(crate) fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn flashes_html(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            let background = match flash.category {
                FlashCategory::Success => "#dfd",
                FlashCategory::Info => "#ddf",
                FlashCategory::Danger => "#fdd",
            };
            format!(
                r#"<div class="flash flash-{}" style="background-color: {background}; {FLASH_BASE_STYLE}">{}</div>"#,
                flash.category.as_str(),
                escape(&flash.message)
            )
        })
        .collect()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body style="font-family: Arial;">
{body}
</body>
</html>
"#
    )
}

pub(crate) fn index(username: Option<&str>, flashes: &[Flash]) -> String {
    let content = match username {
        Some(username) => format!(
            r#"<p>You are logged in as <strong>{}</strong>.</p>
<p><a href="/games">Continue to Play Games</a></p>
<p><a href="/logout">Logout</a></p>"#,
            escape(username)
        ),
        None => r#"<p>You must sign up or log in to play games.</p>
<p><a href="/signup">Sign Up</a></p>
<p><a href="/login">Login</a></p>"#
            .to_string(),
    };

    layout(
        "Home Page",
        &format!(
            "<h1>Welcome to Playgate!</h1>\n{}\n{content}",
            flashes_html(flashes)
        ),
    )
}

fn credentials_form(button: &str) -> String {
    format!(
        r#"<form method="POST">
<label for="username">Username:</label><br>
<input type="text" id="username" name="username" required><br><br>
<label for="password">Password:</label><br>
<input type="password" id="password" name="password" required><br><br>
<button type="submit">{button}</button>
</form>"#
    )
}

pub(crate) fn signup(flashes: &[Flash]) -> String {
    layout(
        "Sign Up",
        &format!(
            r#"<h1>Create an Account</h1>
{}
{}
<p>Already have an account? <a href="/login">Login here</a>.</p>"#,
            flashes_html(flashes),
            credentials_form("Sign Up")
        ),
    )
}

pub(crate) fn login(flashes: &[Flash]) -> String {
    layout(
        "Login",
        &format!(
            r#"<h1>Log In</h1>
{}
{}
<p>Don't have an account? <a href="/signup">Sign up here</a>.</p>"#,
            flashes_html(flashes),
            credentials_form("Log In")
        ),
    )
}

pub(crate) fn games(username: &str, flashes: &[Flash]) -> String {
    layout(
        "Games",
        &format!(
            r#"<h1>Welcome, {}!</h1>
{}
<h2>Successfully Logged In!</h2>
<p>This is the exclusive games section. You made it!</p>
<div style="border: 2px solid green; padding: 20px; background-color: #eaffea;">
<h3>Example Game Content:</h3>
<ul>
<li>Game 1: Borrow Checker Blitz</li>
<li>Game 2: Crate Builder</li>
</ul>
</div>
<p><a href="/logout">Click here to log out</a>.</p>
<p><a href="/">Back to Home</a>.</p>"#,
            escape(username),
            flashes_html(flashes)
        ),
    )
}
