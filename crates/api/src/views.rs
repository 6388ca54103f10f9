//! Server-rendered HTML pages.

use crate::session::SessionImage;

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <nav><a href=\"/\">Dashboard</a> | <a href=\"/logout\">Logout</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
    )
}

/// Dashboard for the session's current image, with edit and delete forms.
pub fn render_dashboard(image: &SessionImage) -> String {
    let id = image.id;
    let category = escape_html(&image.category);
    let body = format!(
        "<h1>Current picture</h1>\n\
         <dl><dt>ID</dt><dd id=\"image-id\">{id}</dd>\
         <dt>Category</dt><dd id=\"image-category\">{category}</dd></dl>\n\
         <form method=\"post\" action=\"/image/{id}\">\n\
         <input type=\"hidden\" name=\"_method\" value=\"put\">\n\
         <label>Category <input type=\"text\" name=\"category\" value=\"{category}\"></label>\n\
         <label>URL <input type=\"url\" name=\"url\" placeholder=\"unchanged\"></label>\n\
         <button type=\"submit\">Update</button>\n\
         </form>\n\
         <form method=\"post\" action=\"/image/{id}\">\n\
         <input type=\"hidden\" name=\"_method\" value=\"delete\">\n\
         <button type=\"submit\">Delete</button>\n\
         </form>"
    );
    layout("Dashboard", &body)
}

/// Page for saving a picture, which also starts a session for it.
pub fn render_login() -> String {
    let body = "<h1>Save a picture</h1>\n\
         <form id=\"save-form\">\n\
         <label>Category <input type=\"text\" name=\"category\" required></label>\n\
         <label>URL <input type=\"url\" name=\"url\" required></label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <pre id=\"save-error\"></pre>\n\
         <script>\n\
         document.getElementById('save-form').addEventListener('submit', async (e) => {\n\
           e.preventDefault();\n\
           const form = new FormData(e.target);\n\
           const res = await fetch('/save', {\n\
             method: 'POST',\n\
             headers: { 'Content-Type': 'application/json' },\n\
             body: JSON.stringify({ category: form.get('category'), url: form.get('url') }),\n\
           });\n\
           if (res.redirected) { window.location = res.url; return; }\n\
           document.getElementById('save-error').textContent = await res.text();\n\
         });\n\
         </script>";
    layout("Save a picture", body)
}
