use std::time::Instant;

use egui::epaint::{CircleShape, RectShape};
use egui::{Align2, Color32, Pos2, Rect, Rounding, Shape, Vec2};

use super::algebra_2d::AaBB;
use super::mechanics::{Ball, BreakoutMechanics, Brick, Paddle, MODEL_GRID_LEN_X, MODEL_GRID_LEN_Y};

const BACKGROUND_COLOR: Color32 = Color32::BLACK;
pub const FOREGROUND_COLOR: Color32 = Color32::WHITE;

/// in model units; scaled with the canvas like everything else
const TEXT_FONT_SIZE: f32 = 26.0;
const TEXT_MARGIN: f32 = 10.0;

const GAME_OVER_MESSAGE: &str = "Game Over!";

/// A line of text to paint; kept apart from the shapes since laying out text needs the font system
#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub pos: Pos2,
    pub anchor: Align2,
}

pub struct AppGameDrawer<'a> {
    canvas_size: Vec2,
    game_state: &'a BreakoutMechanics,
    now: Instant,
}

impl<'a> AppGameDrawer<'a> {
    pub fn new(
        canvas_size: Vec2,
        game_state: &'a BreakoutMechanics,
        now: Instant,
    ) -> Self {
        Self { canvas_size, game_state, now }
    }

    /// pos / MODEL_LEN = result / canvas_size
    /// => result = pos * canvas_size / MODEL_LEN
    fn scale(
        &self,
        pos: Pos2,
    ) -> Pos2 {
        Pos2::new(
            pos.x * self.canvas_size.x / MODEL_GRID_LEN_X as f32,
            pos.y * self.canvas_size.y / MODEL_GRID_LEN_Y as f32,
        )
    }

    fn scale_rect(
        &self,
        aabb: &AaBB,
    ) -> Rect {
        let rect = aabb.to_rect();
        Rect::from_two_pos(self.scale(rect.min), self.scale(rect.max))
    }

    pub fn font_size(&self) -> f32 {
        TEXT_FONT_SIZE * self.canvas_size.y / MODEL_GRID_LEN_Y as f32
    }

    /// Background first, then paddle, ball and bricks
    pub fn shapes(&self) -> Vec<Shape> {
        let mut result = Vec::with_capacity(self.game_state.bricks.len() + 3);
        result.push(self.background());
        result.push(self.draw_paddle(&self.game_state.paddle));
        result.push(self.draw_ball(&self.game_state.ball));
        result.extend(self.game_state.bricks.iter().map(|b| self.draw_brick(b)));
        result
    }

    /// Score, high score and the phase message, if any
    pub fn texts(&self) -> Vec<TextOverlay> {
        let mut result = vec![
            TextOverlay {
                text: format!("Score: {}", self.game_state.score),
                pos: self.scale(Pos2::new(TEXT_MARGIN, TEXT_MARGIN)),
                anchor: Align2::LEFT_TOP,
            },
            TextOverlay {
                text: format!("High Score: {}", self.game_state.high_score),
                pos: self.scale(Pos2::new(MODEL_GRID_LEN_X as f32 - TEXT_MARGIN, TEXT_MARGIN)),
                anchor: Align2::RIGHT_TOP,
            },
        ];

        let message = if let Some(numeral) = self.game_state.countdown_numeral(self.now) {
            Some(numeral.to_string())
        } else if self.game_state.is_game_over() {
            Some(GAME_OVER_MESSAGE.to_string())
        } else {
            None
        };
        if let Some(text) = message {
            result.push(TextOverlay {
                text,
                pos: self.scale(Pos2::new(MODEL_GRID_LEN_X as f32 / 2.0, MODEL_GRID_LEN_Y as f32 / 2.0)),
                anchor: Align2::CENTER_CENTER,
            });
        }
        result
    }

    fn background(&self) -> Shape {
        RectShape::filled(
            Rect::from_min_size(Pos2::ZERO, self.canvas_size),
            Rounding::none(),
            BACKGROUND_COLOR,
        )
        .into()
    }

    fn draw_ball(
        &self,
        ball: &Ball,
    ) -> Shape {
        let rect = self.scale_rect(&ball.shape);
        CircleShape::filled(
            self.scale(ball.shape.center()),
            rect.width().min(rect.height()) / 2.0,
            FOREGROUND_COLOR,
        )
        .into()
    }

    fn draw_paddle(
        &self,
        paddle: &Paddle,
    ) -> Shape {
        RectShape::filled(self.scale_rect(&paddle.shape), Rounding::none(), FOREGROUND_COLOR).into()
    }

    fn draw_brick(
        &self,
        brick: &Brick,
    ) -> Shape {
        RectShape::filled(self.scale_rect(&brick.shape), Rounding::none(), brick.color).into()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::super::mechanics::Phase;
    use super::*;

    fn model_canvas() -> Vec2 {
        Vec2::new(MODEL_GRID_LEN_X as f32, MODEL_GRID_LEN_Y as f32)
    }

    fn filled_rect(shape: &Shape) -> (Rect, Color32) {
        match shape {
            Shape::Rect(RectShape { rect, fill, .. }) => (*rect, *fill),
            other => panic!("expected a rect, got {other:?}"),
        }
    }

    #[test]
    fn draws_background_paddle_ball_then_bricks() {
        let now = Instant::now();
        let mut game_state = BreakoutMechanics::new(0, now);
        game_state.bricks.truncate(7);
        let drawer = AppGameDrawer::new(model_canvas(), &game_state, now);

        let shapes = drawer.shapes();
        assert_eq!(shapes.len(), 3 + 7);

        assert_eq!(filled_rect(&shapes[0]), (Rect::from_min_size(Pos2::ZERO, model_canvas()), Color32::BLACK));
        assert_eq!(
            filled_rect(&shapes[1]),
            (Rect::from_min_max(Pos2::new(350.0, 570.0), Pos2::new(450.0, 590.0)), Color32::WHITE)
        );
        match &shapes[2] {
            Shape::Circle(CircleShape { center, radius, fill, .. }) => {
                assert_eq!(*center, Pos2::new(410.0, 310.0));
                assert_eq!(*radius, 10.0);
                assert_eq!(*fill, Color32::WHITE);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
        for (shape, brick) in shapes[3..].iter().zip(&game_state.bricks) {
            assert_eq!(filled_rect(shape), (brick.shape.to_rect(), brick.color));
        }
    }

    #[test]
    fn scales_to_canvas() {
        let now = Instant::now();
        let game_state = BreakoutMechanics::new(0, now);
        let drawer = AppGameDrawer::new(Vec2::new(400.0, 300.0), &game_state, now);

        let (paddle, _) = filled_rect(&drawer.shapes()[1]);
        assert_eq!(paddle, Rect::from_min_max(Pos2::new(175.0, 285.0), Pos2::new(225.0, 295.0)));
        assert_eq!(drawer.font_size(), TEXT_FONT_SIZE / 2.0);
        assert_eq!(drawer.texts()[1].pos, Pos2::new(395.0, 5.0));
    }

    #[rstest]
    #[case(0, "3")]
    #[case(1_500, "2")]
    #[case(2_100, "1")]
    fn countdown_message(#[case] elapsed_millis: u64, #[case] expected: &str) {
        let start = Instant::now();
        let game_state = BreakoutMechanics::new(120, start);
        let now = start + Duration::from_millis(elapsed_millis);
        let drawer = AppGameDrawer::new(model_canvas(), &game_state, now);

        let texts = drawer.texts();
        assert_eq!(texts[0].text, "Score: 0");
        assert_eq!(texts[0].anchor, Align2::LEFT_TOP);
        assert_eq!(texts[1].text, "High Score: 120");
        assert_eq!(texts[1].anchor, Align2::RIGHT_TOP);
        assert_eq!(texts[2].text, expected);
        assert_eq!(texts[2].pos, Pos2::new(400.0, 300.0));
        assert_eq!(texts[2].anchor, Align2::CENTER_CENTER);
    }

    #[test]
    fn no_message_while_playing() {
        let now = Instant::now();
        let mut game_state = BreakoutMechanics::new(0, now);
        game_state.phase = Phase::Playing;
        game_state.score = 30;
        let drawer = AppGameDrawer::new(model_canvas(), &game_state, now);

        let texts: Vec<String> = drawer.texts().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["Score: 30".to_string(), "High Score: 0".to_string()]);
    }

    #[test]
    fn game_over_message() {
        let now = Instant::now();
        let mut game_state = BreakoutMechanics::new(500, now);
        game_state.phase = Phase::GameOver { since: now };
        let drawer = AppGameDrawer::new(model_canvas(), &game_state, now + Duration::from_secs(1));

        let texts = drawer.texts();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[2].text, "Game Over!");
        assert_eq!(texts[2].anchor, Align2::CENTER_CENTER);
    }
}
