// Copyright 2020-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Native Windows host: one borderless popup window per toast.
//!
//! Requires a win32 event loop to be running on the thread that drives the
//! [`ToastManager`](crate::ToastManager), otherwise the windows never paint.
//! Input on the windows is queued on an [`EventQueue`]; drain it from the
//! event loop into [`ToastManager::handle_event`](crate::ToastManager::handle_event).
//!
//! Action buttons are not drawn by this host.

mod sound;
mod util;

pub use sound::Win32Sound;

use once_cell::sync::Lazy;
use std::{cell::RefCell, collections::VecDeque, ptr, rc::Rc};
use windows_sys::Win32::{
    Foundation::*,
    Graphics::Gdi::*,
    System::LibraryLoader::*,
    UI::{
        Input::KeyboardAndMouse::{TrackMouseEvent, TME_LEAVE, TRACKMOUSEEVENT},
        WindowsAndMessaging::{self as w32wm, *},
    },
};

use crate::{
    config::{Size, ToastKind},
    host::{Host, HostEvent, Placement, Transition},
    toast::{ToastId, ToastView},
};
use util::{rgb, GetWindowLongPtrW, SetWindowLongPtrW, GET_X_LPARAM, GET_Y_LPARAM};

/// toast width
const NW: i32 = 360;
/// toast margin
const NM: i32 = 16;
/// distance of the stack from the work area edge
const EDGE: i32 = 15;
/// used for toast message (title)
const TC: u32 = rgb(255, 255, 255);
/// used for toast description
const SC: u32 = rgb(225, 225, 225);
/// alpha of a toast running its exit animation
const EXIT_ALPHA: u8 = 110;

const WM_MOUSELEAVE: u32 = 0x02A3;

const CLOSE_BTN_RECT: RECT = RECT {
    left: NW - NM - NM / 2,
    top: NM,
    right: (NW - NM - NM / 2) + 8,
    bottom: NM + 8,
};

static WINDOW_CLASS: Lazy<Vec<u16>> = Lazy::new(|| unsafe {
    let class_name = util::encode_wide("toastkit-toast");
    let wnd_class = WNDCLASSEXW {
        lpfnWndProc: Some(window_proc),
        lpszClassName: class_name.as_ptr(),
        hInstance: GetModuleHandleW(ptr::null()),
        hbrBackground: 0,
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW | CS_OWNDC,
        cbClsExtra: 0,
        cbWndExtra: 0,
        hIcon: 0,
        hCursor: 0, // must be null in order for cursor state to work properly
        lpszMenuName: ptr::null(),
        hIconSm: 0,
    };
    RegisterClassExW(&wnd_class);
    class_name
});

fn background(kind: ToastKind) -> u32 {
    match kind {
        ToastKind::Success => rgb(34, 139, 84),
        ToastKind::Error => rgb(200, 48, 48),
        ToastKind::Warning => rgb(214, 142, 20),
        ToastKind::Info => rgb(40, 110, 200),
        ToastKind::Loading => rgb(80, 86, 96),
    }
}

fn height(size: Size) -> i32 {
    match size {
        Size::Small => 64,
        Size::Medium => 88,
        Size::Large => 112,
    }
}

fn font_size(size: Size) -> i32 {
    match size {
        Size::Small => 14,
        Size::Medium => 17,
        Size::Large => 20,
    }
}

/// Input collected from the toast windows, shared with the application.
#[derive(Debug, Clone, Default)]
pub struct EventQueue(Rc<RefCell<VecDeque<HostEvent>>>);

impl EventQueue {
    fn push(&self, event: HostEvent) {
        self.0.borrow_mut().push_back(event);
    }

    /// Takes every queued event, oldest first.
    pub fn drain(&self) -> Vec<HostEvent> {
        self.0.borrow_mut().drain(..).collect()
    }
}

struct WindowData {
    view: ToastView,
    events: EventQueue,
    tracking_mouse: bool,
    mouse_hovering_close_btn: bool,
}

/// Draws toasts as topmost tool windows stacked in a corner of the primary
/// monitor's work area.
pub struct Win32Host {
    /// Oldest first.
    windows: Vec<(ToastId, HWND)>,
    placement: Placement,
    events: EventQueue,
}

impl Win32Host {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            placement: crate::Config::default().placement(),
            events: EventQueue::default(),
        }
    }

    /// Queue the toast windows report input to.
    pub fn events(&self) -> EventQueue {
        self.events.clone()
    }

    fn hwnd(&self, id: &ToastId) -> Option<HWND> {
        self.windows
            .iter()
            .find(|(toast, _)| toast == id)
            .map(|(_, hwnd)| *hwnd)
    }

    /// Repositions every toast window, oldest on top.
    fn restack(&self) {
        let heights: Vec<i32> = self
            .windows
            .iter()
            .map(|(_, hwnd)| unsafe { window_data(*hwnd) }.map_or(0, |d| height(d.view.size)))
            .collect();
        let work_area = unsafe { util::primary_work_area() };
        let origins = util::stack_origins(work_area, &heights, &self.placement);

        for (((_, hwnd), h), origin) in self.windows.iter().zip(heights).zip(origins) {
            unsafe {
                SetWindowPos(
                    *hwnd,
                    0,
                    origin.x,
                    origin.y,
                    NW,
                    h,
                    SWP_NOACTIVATE | SWP_NOZORDER,
                );
            }
        }
    }
}

impl Default for Win32Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Win32Host {
    fn place_container(&mut self, placement: &Placement) {
        self.placement = *placement;
        self.restack();
    }

    fn create(&mut self, view: &ToastView) {
        let data = WindowData {
            view: view.clone(),
            events: self.events.clone(),
            tracking_mouse: false,
            mouse_hovering_close_btn: false,
        };

        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_TOOLWINDOW | WS_EX_LAYERED | WS_EX_NOACTIVATE,
                WINDOW_CLASS.as_ptr(),
                util::encode_wide("toastkit-toast-window").as_ptr(),
                WS_POPUP,
                0,
                0,
                NW,
                height(view.size),
                0,
                0,
                GetModuleHandleW(ptr::null()),
                Box::into_raw(Box::new(data)) as _,
            )
        };

        if hwnd == 0 {
            tracing::warn!(id = %view.id, error = unsafe { GetLastError() }, "failed to create toast window");
            return;
        }

        self.windows.push((view.id.clone(), hwnd));
        self.restack();
    }

    fn update(&mut self, view: &ToastView) {
        let Some(hwnd) = self.hwnd(&view.id) else {
            return;
        };
        unsafe {
            if let Some(data) = window_data(hwnd) {
                data.view = view.clone();
            }
            InvalidateRect(hwnd, ptr::null(), 0);
        }
    }

    fn transition(&mut self, id: &ToastId, transition: Transition) {
        let Some(hwnd) = self.hwnd(id) else {
            return;
        };
        unsafe {
            match transition {
                Transition::Enter(_) => {
                    SetLayeredWindowAttributes(hwnd, 0, 255, LWA_ALPHA);
                    ShowWindow(hwnd, SW_SHOWNOACTIVATE);
                }
                Transition::Exit(_) => {
                    SetLayeredWindowAttributes(hwnd, 0, EXIT_ALPHA, LWA_ALPHA);
                }
                // no progress bar is drawn
                Transition::Freeze | Transition::Run => {}
            }
        }
    }

    fn remove(&mut self, id: &ToastId) {
        let Some(index) = self.windows.iter().position(|(toast, _)| toast == id) else {
            return;
        };
        let (_, hwnd) = self.windows.remove(index);
        unsafe {
            ShowWindow(hwnd, SW_HIDE);
            DestroyWindow(hwnd);
        }
        self.restack();
    }
}

impl Drop for Win32Host {
    fn drop(&mut self) {
        for (_, hwnd) in self.windows.drain(..) {
            unsafe {
                DestroyWindow(hwnd);
            }
        }
    }
}

unsafe fn window_data<'a>(hwnd: HWND) -> Option<&'a mut WindowData> {
    let userdata = GetWindowLongPtrW(hwnd, GWL_USERDATA) as *mut WindowData;
    userdata.as_mut()
}

unsafe fn paint(hwnd: HWND, data: &WindowData) {
    let view = &data.view;
    let mut ps: PAINTSTRUCT = std::mem::zeroed();
    let hdc = BeginPaint(hwnd, &mut ps);

    let mut client = RECT {
        left: 0,
        top: 0,
        right: NW,
        bottom: height(view.size),
    };
    let bg = background(view.kind);
    let brush = CreateSolidBrush(bg);
    FillRect(hdc, &client, brush);
    DeleteObject(brush);
    SetBkColor(hdc, bg);

    let align = if view.rtl {
        DT_RIGHT | DT_RTLREADING
    } else {
        DT_LEFT
    };
    let text_right = if view.closable {
        CLOSE_BTN_RECT.left - NM / 2
    } else {
        NW - NM
    };

    // draw toast close button
    if view.closable {
        let hpen = CreatePen(
            PS_SOLID as _,
            2,
            if data.mouse_hovering_close_btn { TC } else { SC },
        );
        let old_hpen = SelectObject(hdc, hpen);

        MoveToEx(
            hdc,
            CLOSE_BTN_RECT.left,
            CLOSE_BTN_RECT.top,
            ptr::null_mut(),
        );
        LineTo(hdc, CLOSE_BTN_RECT.right, CLOSE_BTN_RECT.bottom);
        MoveToEx(
            hdc,
            CLOSE_BTN_RECT.right,
            CLOSE_BTN_RECT.top,
            ptr::null_mut(),
        );
        LineTo(hdc, CLOSE_BTN_RECT.left, CLOSE_BTN_RECT.bottom);

        SelectObject(hdc, old_hpen);
        DeleteObject(hpen);
    }

    let size = font_size(view.size);

    // draw toast message
    {
        SetTextColor(hdc, TC);
        let (hfont, old_hfont) = util::set_font(hdc, "Segoe UI", size, 700);
        let mut rc = RECT {
            left: NM,
            top: NM,
            right: text_right,
            bottom: NM + size + 4,
        };
        let message = util::encode_wide(&view.message);
        DrawTextW(
            hdc,
            message.as_ptr(),
            (message.len() - 1) as _,
            &mut rc,
            align | DT_SINGLELINE | DT_END_ELLIPSIS,
        );
        SelectObject(hdc, old_hfont);
        DeleteObject(hfont);
    }

    // draw toast description
    if let Some(description) = &view.description {
        SetTextColor(hdc, SC);
        let (hfont, old_hfont) = util::set_font(hdc, "Segoe UI", size - 2, 400);
        client.left = NM;
        client.top = NM + size + NM / 2;
        client.right = text_right;
        client.bottom -= NM;
        let description = util::encode_wide(description);
        DrawTextW(
            hdc,
            description.as_ptr(),
            (description.len() - 1) as _,
            &mut client,
            align | DT_EXTERNALLEADING | DT_WORDBREAK | DT_END_ELLIPSIS,
        );
        SelectObject(hdc, old_hfont);
        DeleteObject(hfont);
    }

    EndPaint(hwnd, &ps);
}

pub unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        w32wm::WM_NCCREATE => {
            if GetWindowLongPtrW(hwnd, GWL_USERDATA) == 0 {
                let createstruct = &*(lparam as *const CREATESTRUCTW);
                SetWindowLongPtrW(hwnd, GWL_USERDATA, createstruct.lpCreateParams as isize);
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        // make the window borderless
        w32wm::WM_NCCALCSIZE => 0,

        w32wm::WM_PAINT => {
            if let Some(data) = window_data(hwnd) {
                paint(hwnd, data);
                return 0;
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        w32wm::WM_MOUSEMOVE => {
            if let Some(data) = window_data(hwnd) {
                if !data.tracking_mouse {
                    let mut track = TRACKMOUSEEVENT {
                        cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
                        dwFlags: TME_LEAVE,
                        hwndTrack: hwnd,
                        dwHoverTime: 0,
                    };
                    TrackMouseEvent(&mut track);
                    data.tracking_mouse = true;
                    data.events
                        .push(HostEvent::PointerEnter(data.view.id.clone()));
                }

                let (x, y) = (GET_X_LPARAM(lparam), GET_Y_LPARAM(lparam));
                let hit = data.view.closable
                    && util::rect_contains(CLOSE_BTN_RECT, x as i32, y as i32);

                SetCursor(LoadCursorW(0, if hit { IDC_HAND } else { IDC_ARROW }));
                if hit != data.mouse_hovering_close_btn {
                    // only trigger redraw if the previous state is different than the new state
                    InvalidateRect(hwnd, ptr::null(), 0);
                }
                data.mouse_hovering_close_btn = hit;
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        WM_MOUSELEAVE => {
            if let Some(data) = window_data(hwnd) {
                data.tracking_mouse = false;
                if data.mouse_hovering_close_btn {
                    data.mouse_hovering_close_btn = false;
                    InvalidateRect(hwnd, ptr::null(), 0);
                }
                data.events
                    .push(HostEvent::PointerLeave(data.view.id.clone()));
            }
            0
        }

        w32wm::WM_LBUTTONDOWN => {
            if let Some(data) = window_data(hwnd) {
                let (x, y) = (GET_X_LPARAM(lparam), GET_Y_LPARAM(lparam));
                let id = data.view.id.clone();
                if data.view.closable && util::rect_contains(CLOSE_BTN_RECT, x as i32, y as i32) {
                    data.events.push(HostEvent::CloseRequested(id));
                } else {
                    data.events.push(HostEvent::Clicked {
                        id,
                        on_control: false,
                    });
                }
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        w32wm::WM_NCDESTROY => {
            let userdata = GetWindowLongPtrW(hwnd, GWL_USERDATA) as *mut WindowData;
            if !userdata.is_null() {
                SetWindowLongPtrW(hwnd, GWL_USERDATA, 0);
                drop(Box::from_raw(userdata));
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
