//! The notification email. German, like the posts it announces.

pub const NOTIFICATION_SUBJECT: &str = "Dein LinkedIn-Post ist bereit 🚀";

/// Renders the HTML body. `{employee_name}` and `{doc_url}` are the only
/// variable parts.
pub fn build_email_template(employee_name: &str, doc_url: &str) -> String {
    EMAIL_TEMPLATE
        .replace("{employee_name}", employee_name)
        .replace("{doc_url}", doc_url)
        .trim()
        .to_string()
}

const EMAIL_TEMPLATE: &str = r#"
<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
      line-height: 1.6;
      color: #333;
      max-width: 600px;
      margin: 0 auto;
      padding: 20px;
    }
    .header {
      background: linear-gradient(135deg, #0077B5 0%, #00A0DC 100%);
      color: white;
      padding: 30px;
      border-radius: 8px 8px 0 0;
      text-align: center;
    }
    .content {
      background: #f9f9f9;
      padding: 30px;
      border-radius: 0 0 8px 8px;
    }
    .button {
      display: inline-block;
      background: #0077B5;
      color: white;
      padding: 12px 24px;
      text-decoration: none;
      border-radius: 6px;
      margin: 20px 0;
      font-weight: 600;
    }
    .footer {
      text-align: center;
      color: #666;
      font-size: 14px;
      margin-top: 20px;
    }
  </style>
</head>
<body>
  <div class="header">
    <h1>Dein LinkedIn-Post ist bereit</h1>
  </div>
  <div class="content">
    <p>Hallo {employee_name},</p>

    <p>ein neuer LinkedIn-Post wurde für dich vorbereitet und wartet auf deine Veröffentlichung.</p>

    <p style="text-align: center;">
      <a href="{doc_url}" class="button">Dokument öffnen</a>
    </p>

    <p>Bitte prüfe den Text und poste ihn auf LinkedIn.</p>

    <p>Viele Grüsse<br>Dein Content-Team</p>
  </div>
  <div class="footer">
    <p>Diese E-Mail wurde automatisch generiert.</p>
  </div>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_interpolates_name_and_url() {
        let html = build_email_template(
            "Anna Muster",
            "https://docs.google.com/document/d/abc123/edit",
        );
        assert!(html.contains("Hallo Anna Muster,"));
        assert!(html.contains("href=\"https://docs.google.com/document/d/abc123/edit\""));
        assert!(!html.contains("{employee_name}"));
        assert!(!html.contains("{doc_url}"));
    }

    #[test]
    fn test_template_is_complete_html_document() {
        let html = build_email_template("Anna", "https://example.com");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("Dein LinkedIn-Post ist bereit"));
        assert!(html.contains("Viele Grüsse"));
    }
}
