//! Pure projection of carousel state onto what the page draws.
use crate::breakpoint::BreakpointRule;
use crate::card::{CardFace, CardRecord};
use crate::carousel::CarouselState;

/// Opacity of slides that are visible but not active under dimming rules.
pub const INACTIVE_OPACITY: f32 = 0.4;
/// Narrow layouts never stretch a single card past this width.
pub const SINGLE_SLIDE_MAX_WIDTH_PX: u32 = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub track: TrackLayout,
    /// Visible slides in display order, leading slide first.
    pub slides: Vec<SlideView>,
    /// `None` when pagination is disabled or there is nothing to paginate.
    pub pagination: Option<Vec<Dot>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackLayout {
    /// Number of slides actually shown, never more than there are cards.
    pub visible_count: usize,
    pub spacing: u32,
    pub centered: bool,
    /// Slide count the breakpoint asked for, used for sizing.
    pub columns: usize,
}

impl TrackLayout {
    /// CSS width of one slide, leaving room for the gaps between columns.
    pub fn slide_width_css(&self) -> String {
        let columns = self.columns.max(1);
        if columns == 1 {
            return "100%".to_string();
        }
        let gap = (self.spacing as f32 * (columns - 1) as f32) / columns as f32;
        let share = 100.0 / columns as f32;
        format!("calc({}% - {}px)", trim_float(share), trim_float(gap))
    }

    pub fn slide_max_width_px(&self) -> Option<u32> {
        (self.columns <= 1).then_some(SINGLE_SLIDE_MAX_WIDTH_PX)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideView {
    pub card_index: usize,
    pub face: CardFace,
    pub active: bool,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub index: usize,
    pub active: bool,
}

/// Builds the visual tree for `state` under `rule`.
///
/// When there are fewer cards than the rule wants visible, the available
/// cards are shown once each, left-aligned.
pub fn render(state: &CarouselState, rule: &BreakpointRule, cards: &[CardRecord]) -> VisualTree {
    let count = cards.len();
    let visible = rule.visible_count.min(count);
    let short = count < rule.visible_count;
    let active = if count == 0 { 0 } else { state.active_index % count };

    let track = TrackLayout {
        visible_count: visible,
        spacing: rule.spacing,
        centered: rule.centered && !short,
        columns: rule.visible_count,
    };

    let leading = leading_index(active, visible, count, track.centered, state.is_looping);

    let slides = (0..visible)
        .map(|offset| {
            let card_index = (leading + offset) % count;
            let is_active = card_index == active;
            let opacity = if is_active || !rule.dims_inactive() {
                1.0
            } else {
                INACTIVE_OPACITY
            };
            SlideView {
                card_index,
                face: cards[card_index].face(),
                active: is_active,
                opacity,
            }
        })
        .collect();

    let pagination = (state.show_pagination && count > 0).then(|| {
        (0..count)
            .map(|index| Dot {
                index,
                active: index == active,
            })
            .collect()
    });

    VisualTree {
        track,
        slides,
        pagination,
    }
}

fn leading_index(active: usize, visible: usize, count: usize, centered: bool, looping: bool) -> usize {
    if count == 0 || visible == 0 {
        return 0;
    }
    let back = if centered { (visible - 1) / 2 } else { 0 };
    if looping {
        (active + count - back % count) % count
    } else {
        active.saturating_sub(back).min(count - visible)
    }
}

fn trim_float(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardImage;
    use crate::carousel::Phase;

    fn cards(n: usize) -> Vec<CardRecord> {
        (0..n)
            .map(|i| CardRecord::new(format!("/card{i}.jpg"), format!("${i}"), format!("tag {i}")))
            .collect()
    }

    fn state(active_index: usize, card_count: usize) -> CarouselState {
        CarouselState {
            active_index,
            card_count,
            phase: Phase::Idle,
            is_looping: true,
            transitioning: false,
            show_pagination: true,
        }
    }

    fn indices(tree: &VisualTree) -> Vec<usize> {
        tree.slides.iter().map(|slide| slide.card_index).collect()
    }

    #[test]
    fn narrow_shows_active_slide_alone() {
        let tree = render(&state(2, 3), &BreakpointRule::NARROW, &cards(3));

        assert_eq!(indices(&tree), vec![2]);
        assert!(tree.slides[0].active);
        assert_eq!(tree.slides[0].opacity, 1.0);
        assert!(tree.track.centered);
        assert_eq!(tree.track.slide_width_css(), "100%");
        assert_eq!(tree.track.slide_max_width_px(), Some(400));
    }

    #[test]
    fn medium_dims_the_slide_after_the_active_one() {
        let tree = render(&state(2, 3), &BreakpointRule::MEDIUM, &cards(3));

        assert_eq!(indices(&tree), vec![2, 0]);
        assert_eq!(tree.slides[0].opacity, 1.0);
        assert_eq!(tree.slides[1].opacity, INACTIVE_OPACITY);
        assert_eq!(tree.track.slide_width_css(), "calc(50% - 10px)");
        assert_eq!(tree.track.slide_max_width_px(), None);
    }

    #[test]
    fn wide_keeps_every_visible_slide_at_full_opacity() {
        let tree = render(&state(1, 3), &BreakpointRule::WIDE, &cards(3));

        assert_eq!(indices(&tree), vec![1, 2, 0]);
        assert!(tree.slides.iter().all(|slide| slide.opacity == 1.0));
        assert_eq!(tree.slides.iter().filter(|slide| slide.active).count(), 1);
        assert_eq!(tree.track.slide_width_css(), "calc(33.333% - 20px)");
    }

    #[test]
    fn centered_window_puts_active_slide_in_the_middle() {
        let rule = BreakpointRule {
            visible_count: 3,
            centered: true,
            ..BreakpointRule::NARROW
        };

        let tree = render(&state(0, 5), &rule, &cards(5));

        assert_eq!(indices(&tree), vec![4, 0, 1]);
        assert!(tree.slides[1].active);
    }

    #[test]
    fn fewer_cards_than_columns_render_once_left_aligned() {
        let tree = render(&state(1, 2), &BreakpointRule::WIDE, &cards(2));

        assert_eq!(indices(&tree), vec![1, 0]);
        assert_eq!(tree.track.visible_count, 2);
        assert_eq!(tree.track.columns, 3);
        assert!(!tree.track.centered);
    }

    #[test]
    fn non_looping_window_stays_inside_the_deck() {
        let mut last = state(2, 3);
        last.is_looping = false;

        let tree = render(&last, &BreakpointRule::MEDIUM, &cards(3));

        assert_eq!(indices(&tree), vec![1, 2]);
        assert!(tree.slides[1].active);
    }

    #[test]
    fn pagination_mirrors_active_index() {
        let tree = render(&state(1, 3), &BreakpointRule::NARROW, &cards(3));

        let dots = tree.pagination.unwrap();
        assert_eq!(dots.len(), 3);
        assert_eq!(
            dots.iter().filter(|dot| dot.active).map(|dot| dot.index).collect::<Vec<_>>(),
            vec![1]
        );
    }

    #[test]
    fn empty_deck_renders_nothing_without_pagination() {
        let tree = render(&state(0, 0), &BreakpointRule::WIDE, &[]);

        assert!(tree.slides.is_empty());
        assert_eq!(tree.track.visible_count, 0);
        assert_eq!(tree.pagination, None);
    }

    #[test]
    fn hidden_pagination_is_omitted() {
        let mut hidden = state(0, 3);
        hidden.show_pagination = false;

        let tree = render(&hidden, &BreakpointRule::NARROW, &cards(3));

        assert_eq!(tree.pagination, None);
    }

    #[test]
    fn slides_carry_card_faces() {
        let mut deck = cards(1);
        deck[0].image = None;

        let tree = render(&state(0, 1), &BreakpointRule::NARROW, &deck);

        assert_eq!(tree.slides[0].face.image, CardImage::Placeholder);
        assert_eq!(tree.slides[0].face.amount, "$0");
    }
}
