//! The single-page HTML dashboard served at `GET /`.
//!
//! The page is a `minijinja` template filled with the heading and
//! attribution. The template name ends in `.html`, so both are
//! auto-escaped. On load the page fetches `/api/meta` to build the slider
//! and dropdown, then posts every control change to `/api/recompute` and
//! redraws the returned figure specs with Plotly. The browser keeps the
//! current `QueryState`; the server keeps none.

use minijinja::{Environment, context};

use crate::error::ObserverError;
use crate::state::AppState;

const TEMPLATE_NAME: &str = "dashboard.html";

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{{ heading }}</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
    <style>
        body {
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            margin: 0 auto;
            max-width: 1400px;
        }
        h1 { color: #58a6ff; margin-bottom: 0.25rem; }
        h4 { color: #8b949e; margin: 0.5rem 0; }
        hr { border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }
        .layout { display: grid; grid-template-columns: 3fr 2fr; gap: 1.5rem; }
        .controls { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
        .metric {
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
        }
        .metric .value { color: #58a6ff; font-size: 1.5rem; font-weight: bold; }
        input[type=range] { width: 100%; }
        select { width: 100%; min-height: 12rem; background: #161b22; color: #c9d1d9; }
        .error { color: #f85149; min-height: 1.2rem; }
        a { color: #58a6ff; }
        footer { color: #8b949e; font-size: 0.85rem; }
    </style>
</head>
<body>
    <h1>{{ heading }}</h1>
    <hr>
    <div class="layout">
        <div>
            <div class="controls">
                <div class="metric">
                    <h4>Use the slider to select a year</h4>
                    <input id="year" type="range" step="1">
                    <div>Year: <span id="year-label"></span></div>
                </div>
                <div class="metric">
                    <h4>Total global emissions for <span id="readout-year"></span>:</h4>
                    <div class="value" id="readout"></div>
                </div>
            </div>
            <div id="map"></div>
        </div>
        <div>
            <h4>Select or reject countries from the list</h4>
            <select id="entities" multiple></select>
            <div id="bars"></div>
        </div>
    </div>
    <div class="error" id="error"></div>
    <hr>
    <footer>{{ attribution }}</footer>
    <script>
        let current = null;
        const slider = document.getElementById('year');
        const picker = document.getElementById('entities');
        const errorBox = document.getElementById('error');

        async function postJson(url, body) {
            const res = await fetch(url, {
                method: 'POST',
                headers: { 'content-type': 'application/json' },
                body: JSON.stringify(body),
            });
            const json = await res.json();
            if (!res.ok) { throw new Error(json.error || res.statusText); }
            return json;
        }

        function render(view) {
            document.getElementById('year-label').textContent = view.year;
            document.getElementById('readout-year').textContent = view.year;
            document.getElementById('readout').textContent = view.world_total_readout;

            const map = view.choropleth;
            const last = Math.max(map.color_scale.stops.length - 1, 1);
            Plotly.react('map', [{
                type: 'choropleth',
                locations: map.regions.map(r => r.code),
                z: map.regions.map(r => r.value),
                text: map.regions.map(r => r.entity),
                hovertemplate: '<b>%{text}</b><br>%{z}<extra></extra>',
                colorscale: map.color_scale.stops.map((c, i) => [i / last, c]),
                zmin: map.color_range.min,
                zmax: map.color_range.max,
                colorbar: { title: map.value_label },
            }], {
                title: map.title,
                geo: { scope: map.scope, projection: { type: map.projection } },
                margin: map.margin,
                paper_bgcolor: '#0d1117',
                font: { color: '#c9d1d9' },
            });

            const chart = view.bar_chart;
            Plotly.react('bars', [{
                type: 'bar',
                x: chart.bars.map(b => b.entity),
                y: chart.bars.map(b => b.value),
            }], {
                xaxis: { title: chart.x_label },
                yaxis: { title: chart.y_label },
                paper_bgcolor: '#0d1117',
                plot_bgcolor: '#0d1117',
                font: { color: '#c9d1d9' },
            });
        }

        async function send(event) {
            try {
                const next = await postJson('/api/recompute', { state: current, event });
                current = next.state;
                errorBox.textContent = '';
                render(next.view);
            } catch (e) {
                errorBox.textContent = e.message;
            }
        }

        async function init() {
            const meta = await (await fetch('/api/meta')).json();
            current = meta.default_state;
            slider.min = meta.years.min;
            slider.max = meta.years.max;
            slider.value = current.selected_year;
            for (const name of meta.entities) {
                const option = new Option(name, name);
                option.selected = current.selected_entities.includes(name);
                picker.add(option);
            }
            slider.addEventListener('input', () => {
                document.getElementById('year-label').textContent = slider.value;
            });
            slider.addEventListener('change', () =>
                send({ type: 'set_year', year: Number(slider.value) }));
            picker.addEventListener('change', () =>
                send({
                    type: 'set_entities',
                    entities: Array.from(picker.selectedOptions, o => o.value),
                }));
            render(await postJson('/api/view', current));
        }

        init().catch(e => { errorBox.textContent = e.message; });
    </script>
</body>
</html>
"##;

/// Render the dashboard page for the loaded dataset.
pub fn render(state: &AppState) -> Result<String, ObserverError> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ObserverError::Internal(format!("failed to add page template: {e}")))?;
    env.get_template(TEMPLATE_NAME)
        .and_then(|tpl| {
            tpl.render(context! {
                heading => state.heading(),
                attribution => &state.attribution,
            })
        })
        .map_err(|e| ObserverError::Internal(format!("page render failed: {e}")))
}
