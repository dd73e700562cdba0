use actix_session::Session;

const FLASH_KEY: &str = "flash";
const FLASH_ERROR_KEY: &str = "flash_error";

/// Queue a one-shot confirmation for the next rendered page.
pub fn set_flash(session: &Session, message: impl Into<String>) {
    store(session, FLASH_KEY, message.into());
}

/// Queue a one-shot error for the next rendered page.
pub fn set_flash_error(session: &Session, message: impl Into<String>) {
    store(session, FLASH_ERROR_KEY, message.into());
}

pub fn take_flash(session: &Session) -> Option<String> {
    take(session, FLASH_KEY)
}

pub fn take_flash_error(session: &Session) -> Option<String> {
    take(session, FLASH_ERROR_KEY)
}

fn store(session: &Session, key: &str, message: String) {
    if let Err(e) = session.insert(key, message) {
        log::warn!("Could not store flash message: {e}");
    }
}

fn take(session: &Session, key: &str) -> Option<String> {
    let flash = session.get::<String>(key).unwrap_or(None);
    if flash.is_some() {
        session.remove(key);
    }
    flash
}
