pub mod algebra_2d;
pub mod app_game_drawer;
pub mod high_score;
pub mod mechanics;
