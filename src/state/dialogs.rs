/// The user-facing confirmation and notification surface.
///
/// `confirm` blocks until the user answers; `notify` is a plain
/// acknowledgement.
pub trait Dialogs {
    fn confirm(&mut self, message: &str) -> bool;
    fn notify(&mut self, message: &str);
}

/// Dialogs with a pre-decided answer. Immediate-mode UIs ask the question in
/// a modal first and then replay the operation with the user's answer.
#[derive(Debug, Clone, Default)]
pub struct AnsweredDialogs {
    answer: bool,
    pub notices: Vec<String>,
}

impl AnsweredDialogs {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            notices: Vec::new(),
        }
    }

    pub fn yes() -> Self {
        Self::new(true)
    }
}

impl Dialogs for AnsweredDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        log::debug!("confirm({message:?}) -> {}", self.answer);
        self.answer
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }
}

/// User-facing messages
pub mod messages {
    pub const CONFIRM_REMOVE_CUSTOM: &str =
        "هل أنت متأكد أنك تريد إزالة التصميم المخصص؟ لا يمكن التراجع عن هذا الإجراء.";
    pub const CUSTOM_REMOVED: &str = "تمت إزالة التصميم المخصص.";
    pub const CONFIRM_RESET: &str = "هل أنت متأكد أنك تريد إعادة تعيين التصميم؟ سيتم فقدان جميع التغييرات.";
    pub const SAVED: &str = "تم حفظ التصميم بنجاح!";
    pub const SAVE_FAILED: &str = "حدث خطأ أثناء حفظ التصميم.";
    pub const NOTHING_SAVED: &str = "لم يتم العثور على تصميم محفوظ.";
    pub const LOADED: &str = "تم تحميل التصميم بنجاح!";
    pub const LOAD_FAILED: &str = "حدث خطأ أثناء تحميل التصميم. قد تكون البيانات محفوظة بشكل غير صحيح.";
    pub const CONFIRM_LOAD: &str = "هل تريد استبدال التصميم الحالي بالتصميم المحفوظ؟";
    pub const UNSUPPORTED_IMAGE: &str = "الملف المحدد ليس صورة مدعومة.";
    pub const EXPORTED: &str = "تم تصدير الملف:";
    pub const EXPORT_FAILED: &str = "حدث خطأ أثناء تصدير الملف.";
}
