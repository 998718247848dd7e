//! Browser console script generation.
//!
//! The API sits behind an authenticated web session, so collection happens in
//! the browser: a generated DevTools snippet pages through the endpoint,
//! probes the known response shapes (the same chain the resolver uses), and
//! downloads the combined JSON for conversion. Pure string templating.

use scoredeck_model::{ExtractionStrategy, SourceConfig};

#[derive(Debug, Clone)]
pub struct ScriptOptions {
    pub base_url: String,
    pub page_size: u32,
    pub delay_seconds: u32,
    pub retry_count: u32,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            base_url: "https://game.example.com/api/v1/export".to_string(),
            page_size: 100,
            delay_seconds: 5,
            retry_count: 3,
        }
    }
}

/// Render the scraping script for one source. `ids` parameterizes the run
/// (reward codes, business blocks); an empty list means a single unkeyed
/// sweep.
pub fn generate_script(source: &SourceConfig, ids: &[String], options: &ScriptOptions) -> String {
    let probes = probe_chain(&source.strategies);
    let id_list = serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"// DevTools console script: {name} export
// Paste into the browser console while logged in.
(async () => {{
  const BASE_URL = '{base_url}';
  const PAGE_SIZE = {page_size};
  const DELAY_SECONDS = {delay};
  const MAX_RETRIES = {retries};
  const CODES = {id_list};

  function getTimestamp() {{
    const d = new Date();
    const pad = n => n.toString().padStart(2, '0');
    return d.getFullYear().toString() + pad(d.getMonth() + 1) + pad(d.getDate())
      + '-' + pad(d.getHours()) + pad(d.getMinutes()) + pad(d.getSeconds());
  }}

  async function fetchWithRetry(url, options, maxRetries = MAX_RETRIES, timeout = 30000) {{
    for (let attempt = 1; attempt <= maxRetries; attempt++) {{
      try {{
        const controller = new AbortController();
        const id = setTimeout(() => controller.abort(), timeout);
        const response = await fetch(url, {{ ...options, signal: controller.signal }});
        clearTimeout(id);
        return response;
      }} catch (e) {{
        if (attempt === maxRetries) throw e;
        await new Promise(r => setTimeout(r, 1000 * attempt));
      }}
    }}
  }}

  function extractRecords(data) {{
{probes}    return [];
  }}

  const results = {{}};
  let processed = 0, skipped = 0, errors = 0;
  for (const code of CODES.length ? CODES : ['']) {{
    try {{
      let page = 1;
      const pages = [];
      for (;;) {{
        const url = `${{BASE_URL}}?pageNum=${{page}}&pageSize=${{PAGE_SIZE}}`
          + (code ? `&code=${{code}}` : '');
        const resp = await fetchWithRetry(url, {{
          headers: {{ 'Accept': '*/*', 'Cookie': document.cookie }},
          credentials: 'include'
        }});
        if (!resp.ok) {{ errors++; break; }}
        const data = await resp.json();
        const records = extractRecords(data);
        if (!records.length) {{ if (page === 1) skipped++; break; }}
        pages.push(data);
        if (records.length < PAGE_SIZE) break;
        page++;
        await new Promise(r => setTimeout(r, DELAY_SECONDS * 1000));
      }}
      if (pages.length) {{ results[code || 'all'] = pages; processed++; }}
    }} catch (e) {{
      console.error('failed for', code, e);
      errors++;
    }}
  }}

  const ts = getTimestamp();
  const blob = new Blob([JSON.stringify(results, null, 2)], {{ type: 'application/json' }});
  const a = document.createElement('a');
  a.href = URL.createObjectURL(blob);
  a.download = `{name}_response_${{ts}}.json`;
  a.click();
  console.log(`done: ${{processed}} processed, ${{skipped}} skipped, ${{errors}} errors`);
}})();
"#,
        name = source.name,
        base_url = options.base_url,
        page_size = options.page_size,
        delay = options.delay_seconds,
        retries = options.retry_count,
        id_list = id_list,
        probes = probes,
    )
}

// The probe chain mirrors the resolver's strategy order so the script and
// the converter agree on where records live.
fn probe_chain(strategies: &[ExtractionStrategy]) -> String {
    let mut out = String::new();
    for strategy in strategies {
        let expr = optional_chain(&strategy.path);
        if strategy.wrap_object {
            out.push_str(&format!(
                "    if ({expr} && typeof {expr} === 'object' && !Array.isArray({expr})) return [{expr}];\n"
            ));
        } else {
            out.push_str(&format!("    if (Array.isArray({expr})) return {expr};\n"));
        }
    }
    out
}

fn optional_chain(path: &str) -> String {
    if path.is_empty() {
        return "data".to_string();
    }
    let mut expr = String::from("data");
    for segment in path.split('.') {
        if segment.chars().all(|c| c.is_ascii_digit()) {
            expr.push_str(&format!("?.[{segment}]"));
        } else {
            expr.push_str(&format!("?.{segment}"));
        }
    }
    expr
}
