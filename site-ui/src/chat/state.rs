/// Visibility of the chat window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Closed,
    Open,
}

/// User actions that can move the widget between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    BubbleClicked,
    CloseClicked,
    OverlayClicked,
    EscapePressed,
}

impl WidgetState {
    pub fn next(self, event: WidgetEvent) -> WidgetState {
        match (self, event) {
            (WidgetState::Closed, WidgetEvent::BubbleClicked) => WidgetState::Open,
            (WidgetState::Closed, _) => WidgetState::Closed,
            (WidgetState::Open, _) => WidgetState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == WidgetState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert_eq!(WidgetState::default(), WidgetState::Closed);
    }

    #[test]
    fn only_the_bubble_opens() {
        assert_eq!(
            WidgetState::Closed.next(WidgetEvent::BubbleClicked),
            WidgetState::Open
        );
        for event in [
            WidgetEvent::CloseClicked,
            WidgetEvent::OverlayClicked,
            WidgetEvent::EscapePressed,
        ] {
            assert_eq!(WidgetState::Closed.next(event), WidgetState::Closed);
        }
    }

    #[test]
    fn every_event_closes_an_open_widget() {
        for event in [
            WidgetEvent::BubbleClicked,
            WidgetEvent::CloseClicked,
            WidgetEvent::OverlayClicked,
            WidgetEvent::EscapePressed,
        ] {
            assert_eq!(WidgetState::Open.next(event), WidgetState::Closed);
        }
    }
}
