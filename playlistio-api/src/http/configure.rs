//! Configuration page
//!
//! A single self-contained HTML page rendered with Handlebars. The catalog
//! table is seeded from the decoded configuration; manifests are imported
//! through `/api/import` and install links are assembled in the browser.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::Html,
};
use handlebars::Handlebars;
use serde::Serialize;

use playlistio_core::addon::{identifier, token, UserConfig, DEFAULT_TYPE, PREFIX};

use crate::http::addon::path_params;
use crate::http::{AppError, AppResult, AppState};

const PAGE_TEMPLATE: &str = "configure";

/// Row of the catalog table; ids are shown without the namespace prefix
#[derive(Debug, Serialize)]
struct CatalogRow<'a> {
    #[serde(rename = "type")]
    group: &'a str,
    id: &'a str,
    name: &'a str,
}

/// Template data. Script values are pre-serialized JSON and are inserted
/// unescaped, so they must go through `script_json`.
#[derive(Debug, Serialize)]
struct PageData<'a> {
    logo_url: String,
    version: &'a str,
    embed: &'a str,
    prefix: String,
    default_type: String,
    catalogs: String,
    hashes: String,
}

/// Configuration page renderer
pub struct ConfigurePage {
    handlebars: Arc<Handlebars<'static>>,
}

impl ConfigurePage {
    pub fn new() -> AppResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(PAGE_TEMPLATE, PAGE)
            .map_err(|e| {
                AppError::internal_server_error(format!("Failed to register configure page template: {e}"))
            })?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    fn render(&self, state: &AppState, config: &UserConfig) -> AppResult<String> {
        let rows: Vec<CatalogRow<'_>> = config
            .catalogs
            .iter()
            .map(|entry| CatalogRow {
                group: entry.group(),
                id: identifier::strip_prefix(&entry.id),
                name: &entry.name,
            })
            .collect();

        let data = PageData {
            logo_url: state.manifest.logo_url(),
            version: state.manifest.version(),
            embed: state.config.addon.embed_html.as_deref().unwrap_or_default(),
            prefix: script_json(PREFIX)?,
            default_type: script_json(DEFAULT_TYPE)?,
            catalogs: script_json(&rows)?,
            hashes: script_json(&config.hashes)?,
        };

        self.handlebars
            .render(PAGE_TEMPLATE, &data)
            .map_err(|e| AppError::internal_server_error(format!("Failed to render template: {e}")))
    }
}

/// `GET /` and `GET /configure`
pub async fn configure_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    Ok(Html(state.configure.render(&state, &UserConfig::default())?))
}

/// `GET /{config}/configure`; an undecodable configuration yields an empty page
pub async fn configure_page_with_config(
    State(state): State<AppState>,
    config: Result<Path<String>, PathRejection>,
) -> AppResult<Html<String>> {
    let config = path_params(config)
        .and_then(|config| token::decode_segment(&config))
        .unwrap_or_else(|err| {
            tracing::debug!(error = %err, "Ignoring undecodable configuration on configure page");
            UserConfig::default()
        });
    Ok(Html(state.configure.render(&state, &config)?))
}

/// JSON safe to inline in a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

const PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Playlistio</title>
    <link href="https://fonts.googleapis.com/css2?family=Ubuntu&display=swap" rel="stylesheet">
    <style>
        body { font-family: 'Ubuntu', Helvetica, Arial, sans-serif; text-align: center; padding: 2rem; background: #f4f4f8; color: #333; }
        .container { max-width: 50rem; margin: auto; background: white; padding: 2rem; border-radius: 1rem; }
        h1 { color: #d92323; }
        th, td { border: 0.1rem solid #ccc; padding: 1rem; text-align: left; }
        input { width: 100%; box-sizing: border-box; }
        .button { margin-top: 1rem; border-width: 0; display: inline-block; padding: 0.5rem; background-color: #5835b0; color: white; border-radius: 0.2rem; cursor: pointer; text-decoration: none; }
        .button:hover { background-color: #4a2c93; }
        .button:disabled { background-color: #ccc; cursor: not-allowed; }
        .error { color: #d92323; margin-top: 1rem; }
        .section { text-align: left; margin-top: 2rem; padding: 1rem; border: 0.1rem solid #ddd; border-radius: 1rem; background: #f9f9f9; }
        @media (prefers-color-scheme: dark) {
            body { background: #121212; color: #e0e0e0; }
            .container { background: #1e1e1e; }
            input { background: #2a2a2a; color: #e0e0e0; border: 0.1rem solid #555; }
            th, td { border: 0.1rem solid #555; }
            .button { background-color: #6a5acd; }
            .button:hover { background-color: #5941a9; }
            .button:disabled { background-color: #555; }
            .section { background: #1e1e1e; border: 0.1rem solid #333; }
        }
    </style>
</head>
<body>
    <div class="container">
        <img src="{{logo_url}}" alt="Playlistio">
        <h3 style="color: #f5a623;">v{{version}}</h3>
        {{{embed}}}
        <form id="config-form">
            <div class="section">
                <h3>Catalogs</h3>
                <hr>
                <button type="button" id="add-manifest" class="button">Add Catalogs from Manifest</button>
                <table id="catalog-table" style="width:100%;border-collapse:collapse;margin-top:1rem;">
                    <thead>
                        <tr>
                            <th>Playlistio Catalog Name</th>
                            <th>Catalog ID</th>
                            <th>Playlist Name</th>
                            <th>Actions</th>
                        </tr>
                    </thead>
                    <tbody></tbody>
                </table>
            </div>
            <button type="submit" class="button" id="submit-btn">Generate Install Link</button>
            <div id="error-message" class="error" style="display:none;"></div>
        </form>
        <div id="results" style="display:none;">
            <h2>Install your addon</h2>
            <a href="#" target="_blank" id="install-stremio" class="button">Stremio</a>
            <a href="#" target="_blank" id="install-web" class="button">Stremio Web</a>
            <a id="copy-btn" class="button">Copy URL</a>
            <a href="#" id="reload" class="button">Reload</a>
            <input type="text" id="install-url" style="display:none;" readonly>
        </div>
    </div>
    <script>
        const PREFIX = {{{prefix}}};
        const DEFAULT_TYPE = {{{default_type}}};
        let catalogs = {{{catalogs}}};
        let hashes = {{{hashes}}};

        const errorDiv = document.getElementById('error-message');
        const resultsDiv = document.getElementById('results');
        const tableBody = document.querySelector('#catalog-table tbody');
        const installUrl = document.getElementById('install-url');

        function showError(message) {
            errorDiv.textContent = message;
            errorDiv.style.display = message ? 'block' : 'none';
        }

        function textInput(value, onChange) {
            const cell = document.createElement('td');
            const input = document.createElement('input');
            input.value = value ?? '';
            input.required = true;
            input.addEventListener('input', () => {
                onChange(input.value.trim());
                resultsDiv.style.display = 'none';
            });
            cell.appendChild(input);
            return cell;
        }

        function actionButton(label, onClick) {
            const button = document.createElement('button');
            button.type = 'button';
            button.textContent = label;
            button.classList.add('button');
            button.style.margin = '0.2rem';
            button.addEventListener('click', onClick);
            return button;
        }

        function moveRow(from, to) {
            if (to < 0 || to >= catalogs.length) return;
            [catalogs[from], catalogs[to]] = [catalogs[to], catalogs[from]];
            render();
        }

        function render() {
            tableBody.innerHTML = '';
            catalogs.forEach((entry, index) => {
                const row = document.createElement('tr');
                row.appendChild(textInput(entry.type, v => { entry.type = v; }));
                row.appendChild(textInput(entry.id, v => { entry.id = v; }));
                row.appendChild(textInput(entry.name, v => { entry.name = v; }));
                const actions = document.createElement('td');
                actions.appendChild(actionButton('↑', () => moveRow(index, index - 1)));
                actions.appendChild(actionButton('↓', () => moveRow(index, index + 1)));
                actions.appendChild(actionButton('Remove', () => { catalogs.splice(index, 1); render(); }));
                row.appendChild(actions);
                tableBody.appendChild(row);
            });
            resultsDiv.style.display = 'none';
        }

        document.getElementById('add-manifest').addEventListener('click', async () => {
            const url = prompt('Enter the URL of the manifest:');
            if (!url) return;
            showError('');
            try {
                const response = await fetch('/api/import?url=' + encodeURIComponent(url.trim()));
                const body = await response.json();
                if (!response.ok) throw new Error(body.error || 'Failed to import manifest.');
                hashes[body.hash] = body.baseUrl;
                body.catalogs.forEach(c => catalogs.push({
                    type: c.type ?? DEFAULT_TYPE,
                    id: c.id.startsWith(PREFIX) ? c.id.slice(PREFIX.length) : c.id,
                    name: c.name,
                }));
                render();
            } catch (error) {
                showError(error.message);
            }
        });

        document.getElementById('config-form').addEventListener('submit', event => {
            event.preventDefault();
            showError('');
            const usedHashes = Object.fromEntries(
                Object.entries(hashes).filter(([key]) => catalogs.some(c => c.id.startsWith(key + ':')))
            );
            const config = {};
            if (catalogs.length) config.catalogs = catalogs.map(c => ({ ...c, id: PREFIX + c.id }));
            if (Object.keys(usedHashes).length) config.hashes = usedHashes;

            const location = '://' + window.location.host + '/' + encodeURIComponent(JSON.stringify(config)) + '/';
            const protocol = window.location.protocol.replace(':', '');
            installUrl.value = protocol + location + 'manifest.json';
            document.getElementById('install-stremio').href = 'stremio' + location + 'manifest.json';
            document.getElementById('install-web').href =
                'https://web.stremio.com/#/addons?addon=' + encodeURIComponent(installUrl.value);
            document.getElementById('reload').href = protocol + location + 'configure';
            resultsDiv.style.display = 'block';
        });

        document.getElementById('copy-btn').addEventListener('click', async function () {
            await navigator.clipboard.writeText(installUrl.value);
            this.textContent = 'Copied!';
            setTimeout(() => { this.textContent = 'Copy URL'; }, 2000);
        });

        render();
    </script>
</body>
</html>
"##;
