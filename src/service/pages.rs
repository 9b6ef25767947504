//! HTML served by the front end. Both pages are self-contained (inline CSS, no scripts).

pub const GIF_ROUTE: &str = "/orbits.gif";
pub const VIEWER_ROUTE: &str = "/orbits";
pub const REGENERATE_ROUTE: &str = "/orbits/regenerate";

const LANDING_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Orrery</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <style>
    :root {
      --accent: #ffcc00;
      --accent-dark: #d40511;
      --ink: #111;
      --paper: #fff;
      --muted: #666;
    }
    body { margin: 0; font-family: Arial, Helvetica, sans-serif; background: #f4f4f4; color: var(--ink); }
    header {
      background: var(--accent-dark); color: var(--paper); padding: 16px 24px;
      display: flex; align-items: center; justify-content: space-between;
    }
    .logo {
      background: var(--accent); color: var(--accent-dark); font-weight: 900;
      padding: 8px 14px; border-radius: 4px; letter-spacing: 1px;
    }
    nav a { color: var(--paper); text-decoration: none; margin-left: 16px; font-weight: 600; }
    nav a:hover { text-decoration: underline; }
    .hero {
      background: linear-gradient(135deg, var(--accent) 0%, #ffd633 60%, #fff0a8 100%);
      padding: 64px 24px; text-align: center;
    }
    .hero h1 { margin: 0 0 12px; font-size: 2.4rem; }
    .hero p { margin: 0 auto 24px; max-width: 560px; color: #333; }
    .button {
      display: inline-block; background: var(--accent-dark); color: var(--paper);
      padding: 12px 22px; border-radius: 4px; text-decoration: none; font-weight: 700;
    }
    .cards { display: flex; flex-wrap: wrap; gap: 16px; padding: 32px 24px; justify-content: center; }
    .card {
      background: var(--paper); border-radius: 6px; padding: 20px; width: 260px;
      box-shadow: 0 2px 6px rgba(0, 0, 0, 0.08);
    }
    .card h3 { margin-top: 0; color: var(--accent-dark); }
    footer { text-align: center; padding: 24px; color: var(--muted); font-size: 0.9rem; }
  </style>
</head>
<body>
  <header>
    <span class="logo">ORRERY</span>
    <nav>
      <a href="/">Home</a>
      <a href="/orbits">Orbits</a>
    </nav>
  </header>
  <section class="hero">
    <h1>The solar system, on a loop</h1>
    <p>Eight planets on circular orbits, rendered frame by frame and stitched into a looping GIF.</p>
    <a class="button" href="/orbits">Watch the orbits</a>
  </section>
  <section class="cards">
    <div class="card"><h3>Rendered on demand</h3><p>The animation is built the first time someone asks for it and cached on disk.</p></div>
    <div class="card"><h3>Always fresh</h3><p>Hit regenerate to rebuild the cached file from scratch.</p></div>
    <div class="card"><h3>Not to scale</h3><p>Distances are compressed so every orbit fits on screen.</p></div>
  </section>
  <footer>Orrery demo</footer>
</body>
</html>
"#;

const VIEWER_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Orrery | Orbits</title>
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <style>
    body {
      margin: 0; min-height: 100vh; display: flex; flex-direction: column; align-items: center;
      justify-content: center; background: #0b0d17; color: #e1e4ec; font-family: Arial, Helvetica, sans-serif;
    }
    h1 { font-weight: 600; letter-spacing: 0.5px; }
    img { max-width: 92vw; height: auto; border-radius: 8px; box-shadow: 0 0 24px rgba(255, 204, 0, 0.15); }
    .actions { margin-top: 20px; }
    .actions a, .actions button {
      color: #0b0d17; background: #ffcc00; border: 0; border-radius: 4px; padding: 10px 18px;
      font-weight: 700; text-decoration: none; cursor: pointer; margin: 0 6px;
    }
  </style>
</head>
<body>
  <h1>Planetary orbits</h1>
  <img src="{{GIF_SRC}}" alt="Animated planetary orbits" width="{{WIDTH}}" height="{{HEIGHT}}">
  <div class="actions">
    <a href="/">Home</a>
    <form method="post" action="{{REGENERATE}}" style="display:inline">
      <button type="submit">Regenerate</button>
    </form>
  </div>
</body>
</html>
"#;

pub fn landing_page() -> &'static str {
    LANDING_HTML
}

/// `version` is appended to the GIF URL so browsers refetch after a regeneration.
pub fn viewer_page(version: &str, width: u32, height: u32) -> String {
    VIEWER_HTML
        .replace("{{GIF_SRC}}", &format!("{GIF_ROUTE}?v={version}"))
        .replace("{{WIDTH}}", &width.to_string())
        .replace("{{HEIGHT}}", &height.to_string())
        .replace("{{REGENERATE}}", REGENERATE_ROUTE)
}

#[cfg(test)]
#[path = "../../tests/unit/service/pages.rs"]
mod tests;
