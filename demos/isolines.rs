use isofield::{Buffer2d, Command, Renderer, Scene, SceneConfig};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Instant;

fn main() {
    let [mut w, mut h] = [800, 600];

    let mut frame = Buffer2d::fill([w, h], 0);
    let mut scene = Scene::new(SceneConfig::default());
    let renderer = Renderer::new();

    let mut win = Window::new(
        "Isolines",
        w,
        h,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .unwrap();
    win.limit_update_rate(Some(std::time::Duration::from_micros(16_600)));

    let mut last_frame = Instant::now();
    let mut i = 0;
    while win.is_open() && !win.is_key_down(Key::Escape) {
        let keys = [
            (Key::Up, Command::IncreaseDetail),
            (Key::Down, Command::DecreaseDetail),
            (Key::Right, Command::IncreaseIsolines),
            (Key::Left, Command::DecreaseIsolines),
        ];
        for &(key, command) in &keys {
            if win.is_key_pressed(key, KeyRepeat::Yes) {
                scene.apply(command);
            }
        }

        // Follow the window size
        let (win_w, win_h) = win.get_size();
        if [win_w, win_h] != [w, h] && win_w > 0 && win_h > 0 {
            w = win_w;
            h = win_h;
            frame.resize([w, h], 0);
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        let extraction = scene.tick(dt);
        scene.render(&renderer, &mut frame);

        win.update_with_buffer(frame.raw(), w, h).unwrap();

        if i % 30 == 0 {
            let dims = scene.dimensions();
            win.set_title(&format!(
                "Isolines ({}x{} grid, {} levels, {} segments, FPS = {:.0})",
                dims.cols,
                dims.rows,
                scene.isoline_count(),
                extraction.segments,
                1.0 / dt.max(1e-6)
            ));
        }
        i += 1;
    }
}
