use super::MobileLookupFlow;
use crate::{locator::{Scope, click_first, find_first},
            page::Page,
            poll::Poll,
            portal};

impl<P: Page + ?Sized> MobileLookupFlow<'_, P> {
    /// Close the "previous session is already active" modal if it shows up in time
    pub(super) fn dismiss_session_conflict(&self) -> bool {
        let page = self.page;
        let dismissed = Poll::for_timeout(self.config.conflict_timeout, self.config.poll_interval).run(|| {
            let modal = find_first(page, &Scope::Document, portal::SESSION_CONFLICT_MODAL)?;
            let text = page.text(&Scope::Document, &modal).ok().flatten()?;
            if !text.contains(portal::SESSION_CONFLICT_TEXT) {
                return None;
            }
            click_first(page, &Scope::Within(modal), portal::SESSION_CONFLICT_DISMISS)
        });

        if let Some(button) = &dismissed {
            log::warn!("Dismissed session-conflict modal via {}", button);
        }
        dismissed.is_some()
    }

    /// Press "Proceed" on any visible dialog
    pub(super) fn proceed_through_dialog(&self) -> bool {
        let page = self.page;
        let pressed = Poll::for_timeout(self.config.dialog_timeout, self.config.poll_interval).run(|| {
            let dialog = find_first(page, &Scope::Document, portal::VISIBLE_DIALOG)?;
            click_first(page, &Scope::Within(dialog), portal::DIALOG_PROCEED)
        });

        match &pressed {
            Some(button) => log::info!("Proceeded through dialog via {}", button),
            None => log::debug!("No proceed dialog appeared"),
        }
        pressed.is_some()
    }
}
