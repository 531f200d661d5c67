use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::UiError;

/// Bordered search input.
const SEARCH_HEIGHT: u16 = 3;
/// Footer space reserved for key instructions.
const FOOTER_HEIGHT: u16 = 3;
const PAGINATION_HEIGHT: u16 = 1;
/// Section title, one row of cards and the summary line.
const MIN_RESULTS_HEIGHT: u16 = 6;
const MIN_WIDTH: u16 = 40;

/// Screen areas for every element the controller draws into. Splitting fails
/// with `MissingElement` when an element cannot be placed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Regions {
    pub(crate) search: Rect,
    pub(crate) banners: Rect,
    pub(crate) results: Rect,
    pub(crate) pagination: Rect,
    pub(crate) footer: Rect,
}

impl Regions {
    pub(crate) fn split(area: Rect, banner_count: usize) -> Result<Self, UiError> {
        if area.width < MIN_WIDTH {
            return Err(UiError::MissingElement("results"));
        }

        let required = [
            ("search bar", SEARCH_HEIGHT),
            ("footer", FOOTER_HEIGHT),
            ("pagination", PAGINATION_HEIGHT),
            ("results", MIN_RESULTS_HEIGHT),
        ];
        let mut used = 0u16;
        for (element, height) in required {
            used += height;
            if area.height < used {
                return Err(UiError::MissingElement(element));
            }
        }

        let spare = area.height - used;
        let banner_height = (banner_count.min(u16::MAX as usize) as u16).min(spare);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_HEIGHT),
                Constraint::Length(banner_height),
                Constraint::Min(MIN_RESULTS_HEIGHT),
                Constraint::Length(PAGINATION_HEIGHT),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        Ok(Self {
            search: chunks[0],
            banners: chunks[1],
            results: chunks[2],
            pagination: chunks[3],
            footer: chunks[4],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roomy_terminal_hosts_everything() {
        let regions = Regions::split(Rect::new(0, 0, 120, 40), 2).unwrap();
        assert_eq!(regions.search.height, 3);
        assert_eq!(regions.banners.height, 2);
        assert_eq!(regions.pagination.height, 1);
        assert_eq!(regions.footer.height, 3);
        assert_eq!(regions.results.height, 40 - 3 - 2 - 1 - 3);
    }

    #[test]
    fn missing_elements_are_named() {
        let cases = [
            (Rect::new(0, 0, 30, 40), "results"),
            (Rect::new(0, 0, 80, 2), "search bar"),
            (Rect::new(0, 0, 80, 5), "footer"),
            (Rect::new(0, 0, 80, 6), "pagination"),
            (Rect::new(0, 0, 80, 12), "results"),
        ];
        for (area, element) in cases {
            match Regions::split(area, 0) {
                Err(UiError::MissingElement(name)) => assert_eq!(name, element),
                Ok(_) => panic!("{area:?} should not fit"),
            }
        }
    }

    #[test]
    fn banners_never_squeeze_results() {
        let regions = Regions::split(Rect::new(0, 0, 80, 14), 5).unwrap();
        assert_eq!(regions.banners.height, 1);
        assert_eq!(regions.results.height, 6);
    }
}
