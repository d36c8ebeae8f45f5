/// 一次性填充提示词模板中的 `{name}` 占位符。
///
/// 只扫描模板本身，替换进来的值不会再被当作占位符处理；
/// 未知的占位符原样保留。
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        filled.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let replacement = after_open.find('}').and_then(|close| {
            let key = &after_open[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });

        match replacement {
            Some((value, close)) => {
                filled.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                filled.push('{');
                rest = after_open;
            }
        }
    }

    filled.push_str(rest);
    filled
}
