//! The calling contract between the renderer and shortcode handlers.

use std::any::Any;

use shortcodes_lexer::KeywordArgs;

/// Error returned by a failing handler.
///
/// Any error type converts into it, so handlers can use `?` freely.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of one handler invocation.
pub type HandlerResult = Result<String, HandlerError>;

/// Function pointer form of a handler, as stored by the [`shortcode!`]
/// macro.
///
/// [`shortcode!`]: crate::shortcode
pub type HandlerFn = fn(&dyn Any, Option<&str>, &[String], &KeywordArgs) -> HandlerResult;

/// Renders one shortcode invocation.
///
/// The arguments are, in order: the context value passed to
/// [`Parser::parse_with_context`](crate::Parser::parse_with_context)
/// (`&()` for [`Parser::parse`](crate::Parser::parse)), the rendered content
/// of a block shortcode (`None` for an atomic one), the positional arguments
/// and the keyword arguments.
///
/// Closures and functions with the matching signature implement this trait.
///
/// # Examples
///
/// ```
/// use std::any::Any;
/// use shortcodes::{Handler, HandlerResult, KeywordArgs};
///
/// struct Upper;
///
/// impl Handler for Upper {
///     fn invoke(
///         &self,
///         _context: &dyn Any,
///         content: Option<&str>,
///         _positional: &[String],
///         _keyword: &KeywordArgs,
///     ) -> HandlerResult {
///         Ok(content.unwrap_or_default().to_uppercase())
///     }
/// }
///
/// let out = Upper.invoke(&(), Some("shout"), &[], &KeywordArgs::new()).unwrap();
/// assert_eq!(out, "SHOUT");
/// ```
pub trait Handler: Send + Sync {
    /// Render the shortcode.
    ///
    /// # Errors
    /// Any error returned here aborts the parse and is reported as
    /// [`ShortcodeError::Rendering`](crate::ShortcodeError::Rendering).
    fn invoke(
        &self,
        context: &dyn Any,
        content: Option<&str>,
        positional: &[String],
        keyword: &KeywordArgs,
    ) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&dyn Any, Option<&str>, &[String], &KeywordArgs) -> HandlerResult + Send + Sync,
{
    fn invoke(
        &self,
        context: &dyn Any,
        content: Option<&str>,
        positional: &[String],
        keyword: &KeywordArgs,
    ) -> HandlerResult {
        self(context, content, positional, keyword)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests call infallible handlers")]
mod tests {
    use super::*;

    fn echo(_: &dyn Any, content: Option<&str>, args: &[String], _: &KeywordArgs) -> HandlerResult {
        Ok(format!("{}:{}", args.join(","), content.unwrap_or("-")))
    }

    #[test]
    fn function_pointers_are_handlers() {
        let handler: HandlerFn = echo;
        let out = handler
            .invoke(&(), Some("body"), &["a".to_owned(), "b".to_owned()], &KeywordArgs::new())
            .unwrap();
        assert_eq!(out, "a,b:body");
    }

    #[test]
    fn closures_see_the_context() {
        let handler =
            |ctx: &dyn Any, _: Option<&str>, _: &[String], _: &KeywordArgs| -> HandlerResult {
                Ok(ctx
                    .downcast_ref::<u32>()
                    .map_or_else(|| "none".to_owned(), ToString::to_string))
            };
        let keyword = KeywordArgs::new();
        assert_eq!(handler.invoke(&7_u32, None, &[], &keyword).unwrap(), "7");
        assert_eq!(handler.invoke(&"x", None, &[], &keyword).unwrap(), "none");
    }
}
