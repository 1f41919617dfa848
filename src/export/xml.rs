const DECLARATION: &str = "<?xml version='1.0'?>";

/// Wrap the content in a single CDATA section. A literal `]]>` would close
/// the section early, so it is split across two adjacent sections.
pub(super) fn render(content: &str) -> String {
    let body = content.replace("]]>", "]]]]><![CDATA[>");
    format!("{DECLARATION}<consulta><resultado><![CDATA[{body}]]></resultado></consulta>")
}
