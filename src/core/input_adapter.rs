use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels scrolled per wheel line
pub const LINE_HEIGHT: f32 = 40.0;

/// Keyboard page navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    LineDown,
    LineUp,
    PageDown,
    PageUp,
    Home,
    End,
}

/// Page-level input distilled from window events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageInput {
    /// Pointer position in physical pixels and in logical points
    PointerMoved { physical: Vec2, logical: Vec2 },
    PointerLeft,
    /// Primary button pressed at this logical position
    Click(Vec2),
    /// Scroll by this many logical points; positive is down
    Scroll(f32),
    Navigate(NavKey),
    TogglePause,
    PlayHighlight,
    Quit,
}

/// Translates winit window events into [`PageInput`]
#[derive(Debug, Clone)]
pub struct InputAdapter {
    scale_factor: f32,
    pointer: Option<Vec2>,
}

impl InputAdapter {
    pub fn new(scale_factor: f32) -> Self {
        Self {
            scale_factor: if scale_factor > 0.0 { scale_factor } else { 1.0 },
            pointer: None,
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Last pointer position in logical points
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Physical window size in whole logical points
    pub fn logical_size(&self, width: u32, height: u32) -> (u32, u32) {
        let to_points = |px: u32| (px as f32 / self.scale_factor).round() as u32;
        (to_points(width), to_points(height))
    }

    pub fn process_event(&mut self, event: &WindowEvent) -> Option<PageInput> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let physical = Vec2::new(position.x as f32, position.y as f32);
                let logical = physical / self.scale_factor;
                self.pointer = Some(logical);
                Some(PageInput::PointerMoved { physical, logical })
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer = None;
                Some(PageInput::PointerLeft)
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.pointer.map(PageInput::Click),
            WindowEvent::MouseWheel { delta, .. } => {
                Some(PageInput::Scroll(scroll_points(delta, self.scale_factor)))
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.physical_key {
                    PhysicalKey::Code(code) => map_key(code),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor as f32);
                None
            }
            _ => None,
        }
    }
}

/// Wheel delta in logical points, positive when scrolling toward the page end
pub fn scroll_points(delta: &MouseScrollDelta, scale_factor: f32) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, lines) => -lines * LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(pixels) => -(pixels.y as f32) / scale_factor.max(f32::EPSILON),
    }
}

pub fn map_key(code: KeyCode) -> Option<PageInput> {
    let input = match code {
        KeyCode::ArrowDown => PageInput::Navigate(NavKey::LineDown),
        KeyCode::ArrowUp => PageInput::Navigate(NavKey::LineUp),
        KeyCode::PageDown | KeyCode::Space => PageInput::Navigate(NavKey::PageDown),
        KeyCode::PageUp => PageInput::Navigate(NavKey::PageUp),
        KeyCode::Home => PageInput::Navigate(NavKey::Home),
        KeyCode::End => PageInput::Navigate(NavKey::End),
        KeyCode::KeyP => PageInput::TogglePause,
        KeyCode::KeyH => PageInput::PlayHighlight,
        KeyCode::Escape => PageInput::Quit,
        _ => return None,
    };
    Some(input)
}
