//! Page variants
//!
//! Each deployable copy of the page is a compile-time constant document paired with the
//! `Content-Type` value it is served with.

use serde::{Deserialize, Serialize};
use std::fmt;

const PLAIN_HTML: &str = r#"
    <html>
    <head>
        <title>My Static Web Page</title>
        <style>
            body {
                font-family: Arial, sans-serif;
                background-color: #f4f4f4;
                text-align: center;
                padding-top: 50px;
            }
            h1 {
                color: #333;
            }
        </style>
    </head>
    <body>
        <h1>Hello Symphonians!</h1>
        <p>This is a simple static page served by AWS Lambda.</p>
        <p>Продам Пежо 206+ по ціні макбука. За деталями звертайтесь в ПП</p>
    </body>
    </html>
    "#;

const CHARSET_HTML: &str = r#"
    <html>
    <head>
        <meta charset="UTF-8">
        <title>Static Web Page</title>
        <style>
            body {
                font-family: Arial, sans-serif;
                background-color: #f4f4f4;
                text-align: center;
                padding-top: 50px;
            }
            h1 {
                color: #333;
            }
        </style>
    </head>
    <body>
        <h1>Hello Symphonians!</h1>
        <p>This is a simple static page served by a cloud function.</p>
        <p>Вітаємо! Сторінка віддається без жодного стану.</p>
    </body>
    </html>
    "#;

/// One of the deployable copies of the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageVariant {
    /// No meta charset, bare `text/html`
    #[default]
    Plain,
    /// `<meta charset="UTF-8">`, `charset=UTF-8` in the header
    CharsetUpper,
    /// `<meta charset="UTF-8">`, `charset=utf-8` in the header
    CharsetLower,
}

impl PageVariant {
    pub const ALL: [Self; 3] = [Self::Plain, Self::CharsetUpper, Self::CharsetLower];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Plain => "My Static Web Page",
            Self::CharsetUpper | Self::CharsetLower => "Static Web Page",
        }
    }

    pub const fn html(self) -> &'static str {
        match self {
            Self::Plain => PLAIN_HTML,
            Self::CharsetUpper | Self::CharsetLower => CHARSET_HTML,
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Plain => "text/html",
            Self::CharsetUpper => "text/html; charset=UTF-8",
            Self::CharsetLower => "text/html; charset=utf-8",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::CharsetUpper => "charset-upper",
            Self::CharsetLower => "charset-lower",
        }
    }
}

impl fmt::Display for PageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
