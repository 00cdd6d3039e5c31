//! The JNI calls we make here are not part of a Java native method
//! implementation, so there is no JNI local frame that will unwind and free
//! local references for us, and we can't leave exceptions pending when
//! control stays in Rust. Every entry point makes its own local frame and
//! clears + maps exceptions into Rust errors.

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use log::{debug, error};
use thiserror::Error;

use crate::ime::SoftInput;

#[derive(Error, Debug)]
pub(crate) enum SoftInputError {
    #[error("A Java exception was thrown via a JNI method call: {0}")]
    JavaException(String),
    #[error("A Java VM error")]
    Jvm(#[from] jni::errors::Error),
}

type SoftInputResult<T> = std::result::Result<T, SoftInputError>;

/// [`SoftInput`] implementation driving the activity's `InputMethodManager`
/// over JNI: show against the window's decor view, hide against its window
/// token.
///
/// Must be used from a thread that may attach to the JVM (the calls attach
/// permanently, as the UI pump thread lives as long as the activity).
#[derive(Debug)]
pub struct ActivitySoftInput {
    jvm: JavaVM,
    activity: GlobalRef,
}

impl ActivitySoftInput {
    /// Builds the service seam from the process-wide [`ndk_context`]
    /// VM/activity pointers registered by the activity glue.
    pub fn from_ndk_context() -> SoftInputResult<Self> {
        let ctx = ndk_context::android_context();
        let vm_ptr: *mut jni_sys::JavaVM = ctx.vm().cast();
        let jvm = unsafe { JavaVM::from_raw(vm_ptr)? };
        let activity = unsafe { JObject::from_raw(ctx.context() as jni_sys::jobject) };

        let mut env = jvm.attach_current_thread_permanently()?;
        let activity = env.new_global_ref(&activity)?;

        Ok(Self { jvm, activity })
    }

    fn show(&self) -> SoftInputResult<()> {
        let mut env = self.jvm.attach_current_thread_permanently()?;
        env.with_local_frame::<_, _, SoftInputError>(10, |env| {
            let imm = input_method_manager(env, self.activity.as_obj())?;
            let view = decor_view(env, self.activity.as_obj())?;
            env.call_method(
                &imm,
                "showSoftInput",
                "(Landroid/view/View;I)Z",
                &[JValue::Object(&view), JValue::Int(0)],
            )
            .map_err(|err| clear_and_map_exception(env, err))?;
            debug!("showSoftInput");
            Ok(())
        })
    }

    fn hide(&self) -> SoftInputResult<()> {
        let mut env = self.jvm.attach_current_thread_permanently()?;
        env.with_local_frame::<_, _, SoftInputError>(10, |env| {
            let imm = input_method_manager(env, self.activity.as_obj())?;
            let view = decor_view(env, self.activity.as_obj())?;
            let token = env
                .call_method(&view, "getWindowToken", "()Landroid/os/IBinder;", &[])
                .map_err(|err| clear_and_map_exception(env, err))?
                .l()
                .map_err(SoftInputError::from)?;
            env.call_method(
                &imm,
                "hideSoftInputFromWindow",
                "(Landroid/os/IBinder;I)Z",
                &[JValue::Object(&token), JValue::Int(0)],
            )
            .map_err(|err| clear_and_map_exception(env, err))?;
            debug!("hideSoftInputFromWindow");
            Ok(())
        })
    }
}

impl SoftInput for ActivitySoftInput {
    fn show_soft_input(&mut self) {
        if let Err(err) = self.show() {
            error!("failed to show soft input: {err}");
        }
    }

    fn hide_soft_input(&mut self) {
        if let Err(err) = self.hide() {
            error!("failed to hide soft input: {err}");
        }
    }
}

fn input_method_manager<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
) -> SoftInputResult<JObject<'local>> {
    // Context.INPUT_METHOD_SERVICE
    let service: JObject<'_> = env.new_string("input_method")?.into();
    let imm = env
        .call_method(
            activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&service)],
        )
        .map_err(|err| clear_and_map_exception(env, err))?
        .l()
        .map_err(SoftInputError::from)?;
    Ok(imm)
}

fn decor_view<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
) -> SoftInputResult<JObject<'local>> {
    let window = env
        .call_method(activity, "getWindow", "()Landroid/view/Window;", &[])
        .map_err(|err| clear_and_map_exception(env, err))?
        .l()
        .map_err(SoftInputError::from)?;
    let view = env
        .call_method(&window, "getDecorView", "()Landroid/view/View;", &[])
        .map_err(|err| clear_and_map_exception(env, err))?
        .l()
        .map_err(SoftInputError::from)?;
    Ok(view)
}

/// Maps `jni::errors::Error::JavaException` into a richer error based on the
/// actual contents of the `JThrowable`, clearing the exception in the process.
/// (The `jni` crate doesn't do that automatically since it's more common to
/// let the exception get thrown when returning to Java.)
fn clear_and_map_exception(env: &mut JNIEnv<'_>, err: jni::errors::Error) -> SoftInputError {
    if matches!(err, jni::errors::Error::JavaException) {
        let result = env.with_local_frame::<_, _, jni::errors::Error>(5, |env| {
            let e = env.exception_occurred()?;
            env.exception_clear()?;

            let msg = env
                .call_method(&e, "getMessage", "()Ljava/lang/String;", &[])?
                .l()?;
            let msg = unsafe { JString::from_raw(JObject::into_raw(msg)) };
            let msg = env.get_string(&msg)?;
            let msg: String = msg.into();
            Ok(msg)
        });

        match result {
            Ok(msg) => SoftInputError::JavaException(msg),
            Err(err) => {
                SoftInputError::JavaException(format!("UNKNOWN (failed to query JThrowable: {err:?})"))
            }
        }
    } else {
        err.into()
    }
}
