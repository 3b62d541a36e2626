use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

#[derive(Template)]
#[template(path = "message.html")]
pub struct MessagePageTemplate {
    pub success: bool,
    pub error: bool,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate;
