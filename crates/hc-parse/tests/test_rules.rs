//! Rule extraction over complete announcement texts.

use hc_parse::{extract_rules, Rule};
use hc_time::{Date, DayRecord};

const PAPER_2019: &str = "\
国务院办公厅关于2019年部分节假日安排的通知
国办发明电〔2018〕15号
各省、自治区、直辖市人民政府，国务院各部委、各直属机构：
经国务院批准，现将2019年元旦、春节、清明节、劳动节、端午节、中秋节和国庆节放假调休日期的具体安排通知如下。
一、元旦：2018年12月30日至2019年1月1日放假调休，共3天。2018年12月29日（星期六）上班。
二、春节：2月4日至10日放假调休，共7天。2月2日（星期六）、2月3日（星期日）上班。
三、清明节：4月5日放假，与周末连休。
四、劳动节：5月1日放假。
五、端午节：6月7日放假，与周末连休。
六、中秋节：9月13日放假，与周末连休。
七、国庆节：10月1日至7日放假调休，共7天。9月29日（星期日）、10月12日（星期六）上班。
节假日期间，各地区、各部门要妥善安排好值班和安全、保卫等工作，遇有重大突发事件，要按规定及时报告并妥善处置，确保人民群众祥和平安度过节日假期。
国务院办公厅
2018年12月6日";

#[test]
fn yearly_notice_lists_every_holiday_in_order() {
    let names: Vec<String> = extract_rules(PAPER_2019).map(|r| r.name).collect();
    assert_eq!(
        names,
        ["元旦", "春节", "清明节", "劳动节", "端午节", "中秋节", "国庆节"]
    );
}

#[test]
fn yearly_notice_parses_to_the_full_year() {
    let days: Vec<DayRecord> = extract_rules(PAPER_2019)
        .flat_map(|r| r.parse(2019))
        .collect();
    let off = days.iter().filter(|d| d.is_off_day).count();
    let work = days.len() - off;
    // 3 + 7 + 1 + 1 + 1 + 1 + 7 off-days, 1 + 2 + 2 makeup workdays.
    assert_eq!(off, 21);
    assert_eq!(work, 5);
    let first = days.iter().map(|d| d.date).min().unwrap();
    assert_eq!(first, Date::from_ymd(2018, 12, 29).unwrap());
}

#[test]
fn html_residue_is_tolerated() {
    let paper = "  一、劳动节 ： 5月1日 至 4日 放假调休 ，共4天。 \r\n";
    let rules: Vec<Rule> = extract_rules(paper).collect();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].name, "劳动节");
    assert_eq!(rules[0].description, "5月1日至4日放假调休，共4天。");
}
