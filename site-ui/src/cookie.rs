use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Look up `name` in a `document.cookie` style string and percent-decode it
pub fn find_cookie(cookies: &str, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
        .map(|raw| match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        })
}

/// Read a cookie from the current page
pub fn read_cookie(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let cookies = document.dyn_into::<HtmlDocument>().ok()?.cookie().ok()?;
    if cookies.is_empty() {
        return None;
    }
    find_cookie(&cookies, name)
}
