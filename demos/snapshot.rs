use isofield::{render::save_png, Buffer2d, Renderer, Scene, SceneConfig};

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "isolines.png".to_string());
    let time = args.next().and_then(|t| t.parse().ok()).unwrap_or(1.0f32);

    let mut scene = Scene::new(SceneConfig::default());
    scene.tick(time);

    let mut frame = Buffer2d::fill([800, 600], 0);
    scene.render(&Renderer::new(), &mut frame);

    save_png(&frame, &path).unwrap();
    println!("wrote {} at t = {}", path, time);
}
