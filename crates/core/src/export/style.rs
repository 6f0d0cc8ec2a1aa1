//! Inline stylesheets for printable documents. No external fonts or assets.

const BASE_CSS: &str = "\
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; padding: 40px; max-width: 800px; margin: 0 auto; }
.header { text-align: center; margin-bottom: 40px; padding-bottom: 20px; border-bottom: 3px solid var(--accent); }
.header h1 { color: var(--accent); font-size: 28px; margin-bottom: 10px; }
.header .date { color: #666; font-size: 14px; }
.idea-box { background: #f8f9fa; border-left: 4px solid var(--accent); padding: 20px; margin-bottom: 30px; font-style: italic; }
.idea-box h2 { font-size: 14px; color: #666; margin-bottom: 8px; text-transform: uppercase; letter-spacing: 1px; }
.idea-box p { font-size: 16px; color: #333; }
.content strong { color: #333; }
.content ul { margin: 10px 0; padding-left: 24px; }
.content li { margin-bottom: 8px; }
.content h1, .content h2, .content h3 { color: #333; margin: 20px 0 12px 0; }
.content h1 { font-size: 20px; }
.content h2 { font-size: 18px; }
.content h3 { font-size: 16px; }
.content p { margin-bottom: 12px; }
.footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #eee; text-align: center; color: #999; font-size: 12px; }
";

const REPORT_CSS: &str = "\
.section { margin-bottom: 30px; page-break-inside: avoid; }
.section-header { display: flex; align-items: center; gap: 10px; margin-bottom: 15px; padding-bottom: 10px; border-bottom: 2px solid #eee; }
.section-icon { width: 32px; height: 32px; border-radius: 8px; display: flex; align-items: center; justify-content: center; color: white; font-size: 16px; }
.section-header h3 { font-size: 18px; color: #333; }
.section .content { color: #555; font-size: 14px; }
@media print { body { padding: 20px; } .section { page-break-inside: avoid; } }
";

const SINGLE_CSS: &str = "\
.content { font-size: 15px; line-height: 1.8; color: #444; }
.content h1 { border-bottom: 2px solid var(--accent); padding-bottom: 8px; }
@media print { body { padding: 20px; } }
";

pub const REPORT_ACCENT: &str = "#6366f1";

pub fn report_css() -> String {
    format!(":root {{ --accent: {REPORT_ACCENT}; }}\n{BASE_CSS}{REPORT_CSS}")
}

pub fn single_section_css(accent: &str) -> String {
    format!(":root {{ --accent: {accent}; }}\n{BASE_CSS}{SINGLE_CSS}")
}
