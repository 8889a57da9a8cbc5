// src/template.rs
use minijinja::{context, Environment};

pub const MESSAGE_TEMPLATE: &str = "message_text";

/// Compiles the message text format into a fresh environment.
pub fn build_environment(text_format: &str) -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template_owned(MESSAGE_TEMPLATE, text_format.to_string())?;
    Ok(env)
}

pub fn render_message_text(
    env: &Environment<'_>,
    text: &str,
    topic: &str,
    user_id: &str,
) -> Result<String, minijinja::Error> {
    let tmpl = env.get_template(MESSAGE_TEMPLATE)?;
    tmpl.render(context! { text => text, topic => topic, user_id => user_id })
}
