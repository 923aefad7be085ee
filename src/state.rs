/// Shell-level UI flags that are not window state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellState {
    mouse_capture_enabled: bool,
    mouse_capture_dirty: bool,
    launcher_open: bool,
    launcher_selected: usize,
}

impl ShellState {
    pub fn new(mouse_capture_enabled: bool) -> Self {
        Self {
            mouse_capture_enabled,
            mouse_capture_dirty: false,
            launcher_open: false,
            launcher_selected: 0,
        }
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled == enabled {
            return;
        }
        self.mouse_capture_enabled = enabled;
        self.mouse_capture_dirty = true;
    }

    pub fn toggle_mouse_capture(&mut self) {
        let enabled = !self.mouse_capture_enabled;
        self.set_mouse_capture_enabled(enabled);
    }

    /// The new capture flag if it changed since the last call.
    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        if self.mouse_capture_dirty {
            self.mouse_capture_dirty = false;
            Some(self.mouse_capture_enabled)
        } else {
            None
        }
    }

    pub fn launcher_open(&self) -> bool {
        self.launcher_open
    }

    pub fn set_launcher_open(&mut self, open: bool) {
        self.launcher_open = open;
        if open {
            self.launcher_selected = 0;
        }
    }

    pub fn launcher_selected(&self) -> usize {
        self.launcher_selected
    }

    /// Move the launcher selection by `delta`, wrapping within `len` items.
    pub fn step_launcher(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.launcher_selected = 0;
            return;
        }
        let next = (self.launcher_selected as isize + delta).rem_euclid(len as isize);
        self.launcher_selected = next as usize;
    }
}
