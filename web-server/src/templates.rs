// web-server/src/templates.rs
use common::models::session::SessionUser;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::AppError;

/// Every page the portal can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Protected,
    About,
    Contact,
    Submit,
    NotFound,
}

impl Page {
    pub fn template(self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Login => "login.html",
            Page::Protected => "protected.html",
            Page::About => "about.html",
            Page::Contact => "contact.html",
            Page::Submit => "submit.html",
            Page::NotFound => "404.html",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Hello world!",
            Page::Login => "Log in",
            Page::Protected => "Protected page",
            Page::About => "About us",
            Page::Contact => "Contact us",
            Page::Submit => "Submit data",
            Page::NotFound => "Page not found",
        }
    }
}

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    title: &'static str,
    user: Option<SessionUser>,
    error: Option<&'a str>,
}

/// Template set compiled into the binary
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("login.html", include_str!("../templates/login.html")),
            ("protected.html", include_str!("../templates/protected.html")),
            ("about.html", include_str!("../templates/about.html")),
            ("contact.html", include_str!("../templates/contact.html")),
            ("submit.html", include_str!("../templates/submit.html")),
            ("404.html", include_str!("../templates/404.html")),
        ])?;
        Ok(Self { tera })
    }

    pub fn render(&self, page: Page, user: Option<SessionUser>) -> Result<String, AppError> {
        self.render_with_error(page, user, None)
    }

    pub fn render_with_error(
        &self,
        page: Page,
        user: Option<SessionUser>,
        error: Option<&str>,
    ) -> Result<String, AppError> {
        let context = Context::from_serialize(PageContext {
            title: page.title(),
            user,
            error,
        })?;
        Ok(self.tera.render(page.template(), &context)?)
    }
}
