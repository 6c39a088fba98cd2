/// 在 mod 中帮助 re-export
/// ```ignore
/// // code
/// make_re_export!(xxxx);
/// // gen
/// mod xxx;
/// pub use xxx::*;
/// ```
#[macro_export]
macro_rules! make_re_export {
    ($($(#[$meta:meta])*  $mod_name:ident ),*) => {
        $($(#[$meta])* pub mod $mod_name;)*
        $($(#[$meta])* pub use self::$mod_name::*;)*
    };
}

make_re_export!(authorization, repository, model);
