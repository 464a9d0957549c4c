mod ball_circle_toi;
mod ball_line_toi;
mod ball_triangle_toi;
mod flipper_arm_toi;
