// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::{ffi::OsStr, iter::once, os::windows::ffi::OsStrExt};
use windows_sys::Win32::{
    Foundation::{HWND, LPARAM, POINT, RECT},
    Graphics::Gdi::*,
    UI::WindowsAndMessaging as w32wm,
};

use super::{EDGE, NW};
use crate::{config::Position, host::Placement};

/// Implementation of the `RGB` macro.
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    r as u32 | ((g as u32) << 8) | ((b as u32) << 16)
}

/// Null terminated UTF-16 copy of `s` for the `*W` functions.
pub fn encode_wide(s: impl AsRef<OsStr>) -> Vec<u16> {
    s.as_ref().encode_wide().chain(once(0)).collect()
}

/// Implementation of the `GET_X_LPARAM` macro.
#[allow(non_snake_case)]
pub fn GET_X_LPARAM(lparam: LPARAM) -> i16 {
    (lparam & 0xFFFF) as u16 as i16
}

/// Implementation of the `GET_Y_LPARAM` macro.
#[allow(non_snake_case)]
pub fn GET_Y_LPARAM(lparam: LPARAM) -> i16 {
    ((lparam >> 16) & 0xFFFF) as u16 as i16
}

pub fn rect_contains(rect: RECT, x: i32, y: i32) -> bool {
    x >= rect.left && x <= rect.right && y >= rect.top && y <= rect.bottom
}

#[cfg(target_pointer_width = "32")]
#[allow(non_snake_case)]
pub unsafe fn GetWindowLongPtrW(window: HWND, index: w32wm::WINDOW_LONG_PTR_INDEX) -> isize {
    w32wm::GetWindowLongW(window, index) as _
}

#[cfg(target_pointer_width = "64")]
#[allow(non_snake_case)]
pub unsafe fn GetWindowLongPtrW(window: HWND, index: w32wm::WINDOW_LONG_PTR_INDEX) -> isize {
    w32wm::GetWindowLongPtrW(window, index)
}

#[cfg(target_pointer_width = "32")]
#[allow(non_snake_case)]
pub unsafe fn SetWindowLongPtrW(
    window: HWND,
    index: w32wm::WINDOW_LONG_PTR_INDEX,
    value: isize,
) -> isize {
    w32wm::SetWindowLongW(window, index, value as _) as _
}

#[cfg(target_pointer_width = "64")]
#[allow(non_snake_case)]
pub unsafe fn SetWindowLongPtrW(
    window: HWND,
    index: w32wm::WINDOW_LONG_PTR_INDEX,
    value: isize,
) -> isize {
    w32wm::SetWindowLongPtrW(window, index, value)
}

/// Work area (screen minus taskbar) of the primary monitor.
pub unsafe fn primary_work_area() -> RECT {
    let pt = POINT { x: 0, y: 0 };
    let hmonitor = MonitorFromPoint(pt, MONITOR_DEFAULTTOPRIMARY);
    let mut monitor_info: MONITORINFO = std::mem::zeroed();
    monitor_info.cbSize = std::mem::size_of::<MONITORINFO>() as u32;
    GetMonitorInfoW(hmonitor, &mut monitor_info);
    monitor_info.rcWork
}

/// Selects a new font into `hdc`, returns it and the previously selected one.
///
/// The caller restores the old font and deletes the new one.
pub unsafe fn set_font(hdc: HDC, name: &str, size: i32, weight: i32) -> (HFONT, HGDIOBJ) {
    let name = encode_wide(name);
    let hfont = CreateFontW(
        size,
        0,
        0,
        0,
        weight,
        0,
        0,
        0,
        DEFAULT_CHARSET as _,
        OUT_DEFAULT_PRECIS as _,
        CLIP_DEFAULT_PRECIS as _,
        CLEARTYPE_QUALITY as _,
        FF_DONTCARE as _,
        name.as_ptr(),
    );
    let old = SelectObject(hdc, hfont);
    (hfont, old)
}

/// Top-left corner of each toast window, oldest first, for a stack of
/// windows `heights` tall anchored inside `work_area`.
pub fn stack_origins(work_area: RECT, heights: &[i32], placement: &Placement) -> Vec<POINT> {
    let RECT {
        left,
        top,
        right,
        bottom,
    } = work_area;
    let spacing = placement.spacing as i32;
    let total =
        heights.iter().sum::<i32>() + spacing * (heights.len().saturating_sub(1) as i32);

    let x = match placement.position {
        Position::TopLeft | Position::BottomLeft => left + EDGE,
        Position::TopRight | Position::BottomRight => right - NW - EDGE,
        Position::Center => (left + right - NW) / 2,
    };
    let mut y = match placement.position {
        Position::TopLeft | Position::TopRight => top + EDGE,
        Position::BottomLeft | Position::BottomRight => bottom - EDGE - total,
        Position::Center => (top + bottom - total) / 2,
    };

    heights
        .iter()
        .map(|h| {
            let origin = POINT { x, y };
            y += h + spacing;
            origin
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_packs_bgr() {
        assert_eq!(rgb(0x12, 0x34, 0x56), 0x0056_3412);
    }

    #[test]
    fn lparam_coordinates_are_signed() {
        let lparam = ((-5i16 as u16 as isize) << 16) | 42;
        assert_eq!(GET_X_LPARAM(lparam), 42);
        assert_eq!(GET_Y_LPARAM(lparam), -5);
    }

    const WORK_AREA: RECT = RECT {
        left: 0,
        top: 0,
        right: 1920,
        bottom: 1040,
    };

    fn origins(position: Position) -> Vec<(i32, i32)> {
        let placement = Placement {
            position,
            spacing: 10,
            rtl: false,
        };
        stack_origins(WORK_AREA, &[88, 64], &placement)
            .into_iter()
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn stacks_from_the_top_corners() {
        assert_eq!(origins(Position::TopLeft), vec![(15, 15), (15, 113)]);
        assert_eq!(origins(Position::TopRight), vec![(1545, 15), (1545, 113)]);
    }

    #[test]
    fn bottom_stacks_end_at_the_edge() {
        // 88 + 10 + 64 = 162 tall, ending 15 above the taskbar
        assert_eq!(origins(Position::BottomLeft), vec![(15, 863), (15, 961)]);
        assert_eq!(origins(Position::BottomRight), vec![(1545, 863), (1545, 961)]);
    }

    #[test]
    fn center_stack_is_centred_on_both_axes() {
        assert_eq!(origins(Position::Center), vec![(780, 439), (780, 537)]);
    }

    #[test]
    fn work_area_offset_is_respected() {
        let shifted = RECT {
            left: 100,
            top: 40,
            right: 1920,
            bottom: 1080,
        };
        let placement = Placement {
            position: Position::TopLeft,
            spacing: 0,
            rtl: false,
        };
        let origin = stack_origins(shifted, &[88], &placement)[0];
        assert_eq!((origin.x, origin.y), (115, 55));
        assert!(stack_origins(shifted, &[], &placement).is_empty());
    }

    #[test]
    fn encode_wide_is_null_terminated() {
        assert_eq!(encode_wide("ab"), vec![97, 98, 0]);
    }
}
