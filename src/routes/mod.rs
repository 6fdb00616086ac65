use actix_web::web;

use crate::controllers::*;

// 配置所有路由
// 服务实例在 main.rs 中创建并通过 web::Data 注入
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check).service(
        web::scope("/api")
            // 入库
            .service(download_images)
            .service(print_images)
            // 相册内循环浏览
            .service(get_first_image_in_album)
            .service(like_image)
            .service(skip_image)
            // 全库加权随机浏览
            .service(like_image_v2)
            .service(skip_image_v2)
            // 仪表盘
            .service(print_dashboard),
    );
}
