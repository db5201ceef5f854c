//! Built-in sample drawings

use super::{Background, Scene};
use crate::color::{Color, Hsl, Rgb};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::gradient::{GradientDirection, LinearGradient};
use crate::shapes::{Ellipse, Line, Rectangle, Style};
use crate::util::Rng;

pub const DEMO_NAMES: [&str; 4] = ["simple-figures", "filled-figures", "gradient", "smile"];

/// Look up a built-in scene by name
pub fn demo(name: &str) -> Result<Scene> {
    match name {
        "simple-figures" => Ok(simple_figures()),
        "filled-figures" => filled_figures(),
        "gradient" => gradient(),
        "smile" => Ok(smile()),
        other => Err(Error::Validation(format!(
            "unknown demo {:?}, expected one of {}",
            other,
            DEMO_NAMES.join(", ")
        ))),
    }
}

fn pt(x: i32, y: i32) -> Point<f32> {
    Point::new(x as f32, y as f32)
}

fn stroke(color: Color) -> Style {
    Style::Stroke { color }
}

fn solid(color: Color) -> Style {
    Style::Fill { color }
}

fn gradient_of(stops: &[&str], direction: GradientDirection) -> Result<Style> {
    let stops = stops
        .iter()
        .map(|hex| hex.parse())
        .collect::<Result<Vec<Color>>>()?;
    Ok(Style::Gradient {
        stops: LinearGradient::new(stops)?,
        direction,
    })
}

fn simple_figures() -> Scene {
    let mut scene = Scene::new("simple-figures", 512, 512);
    scene
        .push(Line::new(pt(0, 0), pt(500, 500)), stroke(Color::BLUE))
        .push(Line::new(pt(0, 500), pt(500, 0)), stroke(Color::RED))
        .push(Rectangle::new(pt(100, 100), pt(400, 400)), stroke(Color::GREEN))
        .push(Ellipse::new(pt(100, 100), pt(400, 400)), stroke(Color::GREEN))
        .push(Ellipse::new(pt(20, 20), pt(500, 300)), stroke(Color::BLACK))
        .push(Ellipse::new(pt(480, 480), pt(0, 200)), stroke(Color::BLACK));
    scene
}

fn filled_figures() -> Result<Scene> {
    let trunk = Color::from_rgb(Rgb::new(59, 42, 29), 255);
    let dark_leaves: Color = "#17a607".parse()?;
    let light_leaves: Color = "#63d656".parse()?;

    let mut scene = Scene::new("filled-figures", 1920, 1080)
        .with_background(Background::Solid("#4295f5".parse()?));
    scene
        .push(
            Rectangle::new(pt(0, 0), pt(1920, 400)),
            solid(Color::from_hsl(Hsl::new(152, 92, 45), 255)?),
        )
        .push(Ellipse::new(pt(1800, 900), pt(1900, 1000)), solid(Color::YELLOW));
    for (x, leaves) in [(200, dark_leaves), (900, light_leaves), (1600, dark_leaves)] {
        scene
            .push(Rectangle::new(pt(x, 200), pt(x + 50, 400)), solid(trunk))
            .push(Ellipse::new(pt(x - 50, 300), pt(x + 100, 600)), solid(leaves));
    }
    Ok(scene)
}

fn gradient() -> Result<Scene> {
    const WIDTH: i32 = 720;
    const HEIGHT: i32 = 1280;

    let sky: Vec<Color> = vec!["#461061".parse()?, "#31096e".parse()?, "#110326".parse()?];
    let mut scene = Scene::new("gradient", WIDTH as usize, HEIGHT as usize).with_background(Background::Gradient {
        stops: LinearGradient::new(sky)?,
        direction: GradientDirection::TopToBottom,
    });

    let star: Color = "#f5b0f2".parse()?;
    let mut rng = Rng::new(36);
    for _ in 0..1000 {
        let x = rng.range_i32(0, WIDTH - 1);
        let y = rng.range_i32(0, HEIGHT - 1);
        let size = rng.range_i32(0, 4);
        scene.push(Ellipse::new(pt(x, y), pt(x + size, y + size)), solid(star));
    }

    let planet = ["#c75fc2", "#5e195b", "#260315"];
    let deep = ["#5e195b", "#260315"];
    let shallow = ["#c75fc2", "#5e195b"];
    scene.push(
        Ellipse::new(pt(160, 440), pt(560, 840)),
        gradient_of(&planet, GradientDirection::LeftToRight)?,
    );
    let craters = [
        ((300, 600), (320, 620), &deep),
        ((450, 700), (500, 750), &deep),
        ((380, 620), (420, 660), &deep),
        ((200, 650), (230, 680), &shallow),
        ((290, 750), (330, 790), &shallow),
        ((300, 470), (350, 520), &shallow),
    ];
    for ((x0, y0), (x1, y1), stops) in craters {
        scene.push(
            Ellipse::new(pt(x0, y0), pt(x1, y1)),
            gradient_of(stops, GradientDirection::RightToLeft)?,
        );
    }
    Ok(scene)
}

fn smile() -> Scene {
    let mut scene = Scene::new("smile", 500, 500).with_background(Background::Solid(Color::BLACK));
    let layers = [
        ((0, 0), (500, 500), Color::YELLOW),
        // mouth
        ((95, 45), (405, 175), Color::BLACK),
        ((100, 50), (400, 175), Color::WHITE),
        ((95, 85), (405, 225), Color::BLACK),
        ((100, 90), (400, 220), Color::YELLOW),
        ((80, 104), (420, 220), Color::YELLOW),
        ((80, 120), (420, 250), Color::YELLOW),
        // eyes
        ((115, 195), (185, 455), Color::BLACK),
        ((315, 195), (385, 455), Color::BLACK),
        ((120, 200), (180, 450), Color::WHITE),
        ((320, 200), (380, 450), Color::WHITE),
        ((135, 270), (165, 320), Color::BLACK),
        ((335, 270), (365, 320), Color::BLACK),
    ];
    for ((x0, y0), (x1, y1), color) in layers {
        scene.push(Ellipse::new(pt(x0, y0), pt(x1, y1)), solid(color));
    }
    scene
}
